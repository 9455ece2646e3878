//! Long-run composition estimates
//!
//! The estimator projects where a closed mixture settles without running the
//! integrator. Each species keeps its share of the initial mass and the whole
//! mixture is rescaled to a dilute reference level:
//!
//! `eq[s] = (c0[s] / total) * scale`
//!
//! where `total` is the summed initial concentration and `scale` defaults to
//! [`NORMALIZATION_SCALE`]. Pairwise concentration ratios are reported for
//! every sorted species pair whose denominator is nonzero. The projection
//! preserves proportions, so the reported ratios equal the initial ratios.
//!
//! This is a composition-preserving projection, not a solution of the rate
//! equations. Use [`crate::simulator::simulate`] when the kinetics matter.
//!
//! # Example
//!
//! ```
//! use kinetsol::data::InitialConcentrations;
//! use kinetsol::equilibrium::{estimate_equilibrium, EquilibriumOptions};
//!
//! let mut initials = InitialConcentrations::new();
//! initials.insert("A".parse()?, 3.0);
//! initials.insert("B".parse()?, 1.0);
//!
//! let estimate = estimate_equilibrium(&initials, &EquilibriumOptions::default());
//! let ratio = estimate.ratio("A".parse()?, "B".parse()?).unwrap();
//! assert!((ratio - 3.0).abs() < 1e-12);
//! # Ok::<(), kinetsol::KinetsolError>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{InitialConcentrations, Species};

/// Reference level the projected mixture is scaled to, in mol/L.
pub const NORMALIZATION_SCALE: f64 = 0.000092;

/// Settings for the equilibrium projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumOptions {
    /// Level the summed equilibrium concentrations are scaled to
    pub scale: f64,
}

impl Default for EquilibriumOptions {
    fn default() -> Self {
        Self {
            scale: NORMALIZATION_SCALE,
        }
    }
}

impl EquilibriumOptions {
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// Result of [`estimate_equilibrium`].
///
/// Holds the projected per-species concentrations and the pairwise ratios
/// between them, both keyed in sorted species order.
#[derive(Debug, Clone, PartialEq)]
pub struct EquilibriumEstimate {
    values: BTreeMap<Species, f64>,
    ratios: BTreeMap<(Species, Species), f64>,
}

impl EquilibriumEstimate {
    /// Projected equilibrium concentration per species.
    pub fn values(&self) -> &BTreeMap<Species, f64> {
        &self.values
    }

    /// Ratio `a / b` for every sorted species pair with a nonzero denominator.
    pub fn ratios(&self) -> &BTreeMap<(Species, Species), f64> {
        &self.ratios
    }

    pub fn value(&self, species: Species) -> Option<f64> {
        self.values.get(&species).copied()
    }

    pub fn ratio(&self, a: Species, b: Species) -> Option<f64> {
        self.ratios.get(&(a, b)).copied()
    }
}

impl fmt::Display for EquilibriumEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>8}  {:>14}", "species", "equilibrium")?;
        for (species, value) in &self.values {
            writeln!(f, "{:>8}  {:>14.8}", species.to_string(), value)?;
        }
        if !self.ratios.is_empty() {
            writeln!(f)?;
            writeln!(f, "{:>8}  {:>14}", "ratio", "value")?;
            for ((a, b), ratio) in &self.ratios {
                writeln!(f, "{:>8}  {:>14.6}", format!("{a}/{b}"), ratio)?;
            }
        }
        Ok(())
    }
}

/// Projects `initials` onto the equilibrium composition.
///
/// A mixture with zero total mass has nowhere to settle, so every species maps
/// to zero and no ratios are reported. Ratio denominators of zero are skipped
/// rather than reported as infinities.
pub fn estimate_equilibrium(
    initials: &InitialConcentrations,
    options: &EquilibriumOptions,
) -> EquilibriumEstimate {
    let mut entries: Vec<(Species, f64)> = initials.iter().map(|(s, c)| (*s, *c)).collect();
    entries.sort_by_key(|(species, _)| *species);

    let total: f64 = entries.iter().map(|(_, c)| c).sum();
    if total == 0.0 {
        let values = entries.iter().map(|(species, _)| (*species, 0.0)).collect();
        return EquilibriumEstimate {
            values,
            ratios: BTreeMap::new(),
        };
    }

    let values: BTreeMap<Species, f64> = entries
        .iter()
        .map(|(species, concentration)| (*species, concentration / total * options.scale))
        .collect();

    let ordered: Vec<(Species, f64)> = values.iter().map(|(s, v)| (*s, *v)).collect();
    let mut ratios = BTreeMap::new();
    for (i, (species_a, value_a)) in ordered.iter().enumerate() {
        for (species_b, value_b) in &ordered[i + 1..] {
            if *value_b != 0.0 {
                ratios.insert((*species_a, *species_b), value_a / value_b);
            }
        }
    }

    EquilibriumEstimate { values, ratios }
}
