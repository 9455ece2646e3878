//! Reaction records and their kinetic parameters.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::species::Species;

/// Kinetic parameters of a single reaction.
///
/// Carries the forward rate constant, the reversibility flag with its
/// reverse rate constant, and the activation energies used for Arrhenius
/// temperature correction. Irreversible reactions hold kr = 0 and mirror
/// the forward activation energy into the reverse slot, which keeps the
/// flat parameter views on a network fully populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinetics {
    k: f64,
    kr: f64,
    ea: f64,
    ea_rev: f64,
    reversible: bool,
}

impl Kinetics {
    /// Parameters for an irreversible reaction
    pub fn irreversible(k: f64, ea: f64) -> Self {
        Self {
            k,
            kr: 0.0,
            ea,
            ea_rev: ea,
            reversible: false,
        }
    }

    /// Parameters for a reversible reaction with an explicit reverse rate constant
    pub fn reversible(k: f64, kr: f64, ea: f64, ea_rev: f64) -> Self {
        Self {
            k,
            kr,
            ea,
            ea_rev,
            reversible: true,
        }
    }

    /// Forward rate constant
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Reverse rate constant, 0 for irreversible reactions
    pub fn kr(&self) -> f64 {
        self.kr
    }

    /// Forward activation energy in J/mol
    pub fn ea(&self) -> f64 {
        self.ea
    }

    /// Reverse activation energy in J/mol
    pub fn ea_rev(&self) -> f64 {
        self.ea_rev
    }

    /// Whether the reaction runs in both directions
    pub fn is_reversible(&self) -> bool {
        self.reversible
    }

    /// Temperature-corrected forward rate constant k·exp(−Ea/(R·T)).
    ///
    /// # Arguments
    ///
    /// * `temperature` - Absolute temperature in K
    /// * `gas_constant` - Gas constant in J/(mol·K)
    pub fn forward_rate_at(&self, temperature: f64, gas_constant: f64) -> f64 {
        self.k * (-self.ea / (gas_constant * temperature)).exp()
    }

    /// Temperature-corrected reverse rate constant, 0 for irreversible reactions
    pub fn reverse_rate_at(&self, temperature: f64, gas_constant: f64) -> f64 {
        if self.reversible {
            self.kr * (-self.ea_rev / (gas_constant * temperature)).exp()
        } else {
            0.0
        }
    }

    /// Samples the corrected forward rate constant over a temperature range.
    ///
    /// Returns evenly spaced (temperature, rate constant) pairs covering
    /// `start` to `end` inclusive, the data behind a rate-vs-temperature
    /// view. A single sample lands on `start`; zero samples yield an empty
    /// profile.
    pub fn rate_profile(
        &self,
        start: f64,
        end: f64,
        samples: usize,
        gas_constant: f64,
    ) -> Vec<(f64, f64)> {
        let mut profile = Vec::with_capacity(samples);
        if samples == 0 {
            return profile;
        }
        let spacing = if samples > 1 {
            (end - start) / (samples - 1) as f64
        } else {
            0.0
        };
        for sample in 0..samples {
            let temperature = start + spacing * sample as f64;
            profile.push((temperature, self.forward_rate_at(temperature, gas_constant)));
        }
        profile
    }
}

/// One reaction: flattened reactant and product lists plus kinetics.
///
/// Both sides are stored as occurrence lists where a species with
/// coefficient n appears n times. The repeat count is both the rate-law
/// exponent of the species and the stoichiometric scaling of its
/// concentration change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    reactants: Vec<Species>,
    products: Vec<Species>,
    kinetics: Kinetics,
}

impl Reaction {
    /// Creates a reaction from flattened occurrence lists
    pub fn new(reactants: Vec<Species>, products: Vec<Species>, kinetics: Kinetics) -> Self {
        Self {
            reactants,
            products,
            kinetics,
        }
    }

    /// Reactant occurrences, one entry per unit of coefficient
    pub fn reactants(&self) -> &[Species] {
        &self.reactants
    }

    /// Product occurrences, one entry per unit of coefficient
    pub fn products(&self) -> &[Species] {
        &self.products
    }

    /// Kinetic parameters of this reaction
    pub fn kinetics(&self) -> &Kinetics {
        &self.kinetics
    }

    /// Distinct reactant species with their repeat counts, in first-appearance order
    pub fn reactant_counts(&self) -> Vec<(Species, u32)> {
        occurrence_counts(&self.reactants)
    }

    /// Distinct product species with their repeat counts, in first-appearance order
    pub fn product_counts(&self) -> Vec<(Species, u32)> {
        occurrence_counts(&self.products)
    }

    /// All species taking part in this reaction, sorted and duplicate-free
    pub fn species(&self) -> Vec<Species> {
        let set: BTreeSet<Species> = self
            .reactants
            .iter()
            .chain(self.products.iter())
            .copied()
            .collect();
        set.into_iter().collect()
    }
}

fn occurrence_counts(side: &[Species]) -> Vec<(Species, u32)> {
    let mut counts: Vec<(Species, u32)> = Vec::new();
    for species in side {
        match counts.iter_mut().find(|(seen, _)| seen == species) {
            Some((_, count)) => *count += 1,
            None => counts.push((*species, 1)),
        }
    }
    counts
}

fn format_side(side: &[Species]) -> String {
    occurrence_counts(side)
        .into_iter()
        .map(|(species, count)| {
            if count > 1 {
                format!("{count}{species}")
            } else {
                species.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.kinetics.is_reversible() {
            "<->"
        } else {
            "->"
        };
        let rendered = format!(
            "{} {} {}",
            format_side(&self.reactants),
            arrow,
            format_side(&self.products)
        );
        write!(f, "{}", rendered.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn species(symbol: char) -> Species {
        Species::try_from(symbol).unwrap()
    }

    fn side(symbols: &str) -> Vec<Species> {
        symbols.chars().map(species).collect()
    }

    #[test]
    fn test_kinetics_irreversible() {
        let kinetics = Kinetics::irreversible(0.1, 50_000.0);
        assert_eq!(kinetics.k(), 0.1);
        assert_eq!(kinetics.kr(), 0.0);
        assert_eq!(kinetics.ea(), 50_000.0);
        assert_eq!(kinetics.ea_rev(), 50_000.0);
        assert!(!kinetics.is_reversible());
    }

    #[test]
    fn test_kinetics_reversible() {
        let kinetics = Kinetics::reversible(0.2, 0.1, 40_000.0, 35_000.0);
        assert_eq!(kinetics.kr(), 0.1);
        assert_eq!(kinetics.ea_rev(), 35_000.0);
        assert!(kinetics.is_reversible());
    }

    #[test]
    fn test_forward_rate_without_barrier() {
        let kinetics = Kinetics::irreversible(0.1, 0.0);
        assert_relative_eq!(kinetics.forward_rate_at(298.15, 8.314), 0.1);
    }

    #[test]
    fn test_forward_rate_arrhenius() {
        let kinetics = Kinetics::irreversible(0.1, 50_000.0);
        let expected = 0.1 * (-50_000.0_f64 / (8.314 * 298.15)).exp();
        assert_relative_eq!(kinetics.forward_rate_at(298.15, 8.314), expected);
    }

    #[test]
    fn test_reverse_rate_zero_when_irreversible() {
        let kinetics = Kinetics::irreversible(0.1, 0.0);
        assert_eq!(kinetics.reverse_rate_at(298.15, 8.314), 0.0);

        let reversible = Kinetics::reversible(0.1, 0.05, 0.0, 0.0);
        assert_relative_eq!(reversible.reverse_rate_at(298.15, 8.314), 0.05);
    }

    #[test]
    fn test_rate_profile_shape() {
        let kinetics = Kinetics::irreversible(0.1, 50_000.0);
        let profile = kinetics.rate_profile(250.0, 500.0, 100, 8.314);
        assert_eq!(profile.len(), 100);
        assert_relative_eq!(profile[0].0, 250.0);
        assert_relative_eq!(profile[99].0, 500.0);
        // positive barrier means the constant grows with temperature
        for window in profile.windows(2) {
            assert!(window[1].1 > window[0].1);
        }
    }

    #[test]
    fn test_rate_profile_flat_without_barrier() {
        let kinetics = Kinetics::irreversible(0.3, 0.0);
        let profile = kinetics.rate_profile(250.0, 500.0, 5, 8.314);
        for (_, rate) in profile {
            assert_relative_eq!(rate, 0.3);
        }
    }

    #[test]
    fn test_rate_profile_degenerate_sampling() {
        let kinetics = Kinetics::irreversible(0.1, 1_000.0);
        assert!(kinetics.rate_profile(250.0, 500.0, 0, 8.314).is_empty());
        let single = kinetics.rate_profile(250.0, 500.0, 1, 8.314);
        assert_eq!(single.len(), 1);
        assert_relative_eq!(single[0].0, 250.0);
    }

    #[test]
    fn test_reaction_counts() {
        let reaction = Reaction::new(
            side("AAB"),
            side("C"),
            Kinetics::irreversible(0.1, 0.0),
        );
        assert_eq!(
            reaction.reactant_counts(),
            vec![(species('A'), 2), (species('B'), 1)]
        );
        assert_eq!(reaction.product_counts(), vec![(species('C'), 1)]);
    }

    #[test]
    fn test_reaction_species_sorted() {
        let reaction = Reaction::new(
            side("CB"),
            side("A"),
            Kinetics::irreversible(0.1, 0.0),
        );
        assert_eq!(reaction.species(), side("ABC"));
    }

    #[test]
    fn test_reaction_display() {
        let forward = Reaction::new(
            side("AAB"),
            side("C"),
            Kinetics::irreversible(0.1, 0.0),
        );
        assert_eq!(forward.to_string(), "2A + B -> C");

        let reversible = Reaction::new(
            side("A"),
            side("B"),
            Kinetics::reversible(0.1, 0.05, 0.0, 0.0),
        );
        assert_eq!(reversible.to_string(), "A <-> B");
    }

    #[test]
    fn test_reaction_display_empty_product_side() {
        let reaction = Reaction::new(side("A"), side(""), Kinetics::irreversible(0.1, 0.0));
        assert_eq!(reaction.to_string(), "A ->");
    }
}
