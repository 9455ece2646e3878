//! Reaction specifications and the network builder.
//!
//! A [`ReactionSpec`] is the raw per-reaction input: equation text, forward
//! rate constant, activation energy and a reversibility flag.
//! [`build_network`] turns an ordered batch of specifications into a
//! [`ReactionNetwork`], skipping entries that fail to parse and reporting
//! them in the [`NetworkBuild`] outcome instead of failing the batch.

use std::collections::BTreeSet;
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::data::equation::{parse_equation, EquationError};
use crate::data::reaction::{Kinetics, Reaction};
use crate::data::species::Species;

/// Ratio applied to k for the placeholder reverse rate constant.
///
/// Specifications carry no independent reverse rate, so reversible
/// reactions fall back to kr = k × this ratio. Callers that know the true
/// reverse rate can build [`Kinetics::reversible`] directly.
pub const REVERSE_RATE_RATIO: f64 = 0.5;

/// Default forward rate constant for a fresh specification.
pub const DEFAULT_RATE_CONSTANT: f64 = 0.1;

/// Default activation energy in J/mol for a fresh specification.
pub const DEFAULT_ACTIVATION_ENERGY: f64 = 50_000.0;

/// One user-supplied reaction specification.
///
/// Serializes with the saved-setup field names (`reaction`, `k`, `Ea`,
/// `reversible`) so setup files keep loading unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionSpec {
    #[serde(rename = "reaction")]
    equation: String,
    k: f64,
    #[serde(rename = "Ea")]
    ea: f64,
    reversible: bool,
}

impl ReactionSpec {
    /// Creates a specification for an irreversible reaction
    pub fn new(equation: impl Into<String>, k: f64, ea: f64) -> Self {
        Self {
            equation: equation.into(),
            k,
            ea,
            reversible: false,
        }
    }

    /// Creates a specification with the default rate constant and activation energy
    pub fn from_equation(equation: impl Into<String>) -> Self {
        Self::new(equation, DEFAULT_RATE_CONSTANT, DEFAULT_ACTIVATION_ENERGY)
    }

    /// Marks the specification reversible
    pub fn reversible(mut self) -> Self {
        self.reversible = true;
        self
    }

    /// Equation text of this specification
    pub fn equation(&self) -> &str {
        &self.equation
    }

    /// Forward rate constant
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Activation energy in J/mol
    pub fn ea(&self) -> f64 {
        self.ea
    }

    /// Supplied reversibility flag; reversible arrows in the equation override it
    pub fn is_reversible(&self) -> bool {
        self.reversible
    }
}

/// A specification the builder dropped, with the reason it failed.
#[derive(Debug, Clone)]
pub struct SkippedReaction {
    index: usize,
    equation: String,
    reason: EquationError,
}

impl SkippedReaction {
    /// Position of the specification in the input batch
    pub fn index(&self) -> usize {
        self.index
    }

    /// Equation text as supplied
    pub fn equation(&self) -> &str {
        &self.equation
    }

    /// Why the specification was dropped
    pub fn reason(&self) -> &EquationError {
        &self.reason
    }
}

impl fmt::Display for SkippedReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spec #{} (`{}`): {}", self.index, self.equation, self.reason)
    }
}

/// Outcome of building a network from a batch of specifications.
///
/// Invalid specifications never fail the batch; they are recorded here so
/// callers and tests can see exactly what was dropped and why.
#[derive(Debug, Clone)]
pub struct NetworkBuild {
    network: ReactionNetwork,
    skipped: Vec<SkippedReaction>,
}

impl NetworkBuild {
    /// The network assembled from the specifications that parsed
    pub fn network(&self) -> &ReactionNetwork {
        &self.network
    }

    /// Specifications that were dropped, in input order
    pub fn skipped(&self) -> &[SkippedReaction] {
        &self.skipped
    }

    /// True when every specification made it into the network
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Discards the skip report and keeps the network
    pub fn into_network(self) -> ReactionNetwork {
        self.network
    }

    /// Splits the outcome into the network and the skip report
    pub fn into_parts(self) -> (ReactionNetwork, Vec<SkippedReaction>) {
        (self.network, self.skipped)
    }
}

/// Builds a reaction network from an ordered batch of specifications.
///
/// Reversibility is resolved per entry: a reversible arrow in the equation
/// forces the flag, otherwise the specification's flag is used. Reversible
/// reactions get kr = k × [`REVERSE_RATE_RATIO`] and reuse the forward
/// activation energy for the reverse direction, since specifications carry
/// no independent reverse parameters.
///
/// Specifications that fail to parse are skipped with a warning and listed
/// in the returned [`NetworkBuild`]; the builder itself never fails.
pub fn build_network(specs: &[ReactionSpec]) -> NetworkBuild {
    let mut reactions = Vec::with_capacity(specs.len());
    let mut skipped = Vec::new();

    for (index, spec) in specs.iter().enumerate() {
        match parse_equation(spec.equation()) {
            Ok(parsed) => {
                let kinetics = if parsed.reversibility(spec.is_reversible()) {
                    Kinetics::reversible(
                        spec.k(),
                        spec.k() * REVERSE_RATE_RATIO,
                        spec.ea(),
                        spec.ea(),
                    )
                } else {
                    Kinetics::irreversible(spec.k(), spec.ea())
                };
                let (reactants, products) = parsed.into_sides();
                reactions.push(Reaction::new(reactants, products, kinetics));
            }
            Err(reason) => {
                warn!(
                    "skipping reaction spec #{index} (`{}`): {reason}",
                    spec.equation()
                );
                skipped.push(SkippedReaction {
                    index,
                    equation: spec.equation().to_string(),
                    reason,
                });
            }
        }
    }

    NetworkBuild {
        network: ReactionNetwork::new(reactions),
        skipped,
    }
}

/// An ordered, immutable sequence of reaction records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionNetwork {
    reactions: Vec<Reaction>,
}

impl ReactionNetwork {
    /// Creates a network from already-built reaction records
    pub fn new(reactions: Vec<Reaction>) -> Self {
        Self { reactions }
    }

    /// Reaction records in build order
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    /// Number of reactions
    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    /// True when the network holds no reactions
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    /// Reaction at a position in build order
    pub fn get(&self, index: usize) -> Option<&Reaction> {
        self.reactions.get(index)
    }

    /// Union of species over all reactions, sorted and duplicate-free
    pub fn species(&self) -> Vec<Species> {
        let set: BTreeSet<Species> = self
            .reactions
            .iter()
            .flat_map(|reaction| reaction.species())
            .collect();
        set.into_iter().collect()
    }

    /// Forward rate constants aligned by index with [`reactions`](Self::reactions)
    pub fn rate_constants(&self) -> Vec<f64> {
        self.reactions.iter().map(|r| r.kinetics().k()).collect()
    }

    /// Forward activation energies aligned by index with [`reactions`](Self::reactions)
    pub fn activation_energies(&self) -> Vec<f64> {
        self.reactions.iter().map(|r| r.kinetics().ea()).collect()
    }

    /// Reverse activation energies aligned by index with [`reactions`](Self::reactions)
    pub fn reverse_activation_energies(&self) -> Vec<f64> {
        self.reactions
            .iter()
            .map(|r| r.kinetics().ea_rev())
            .collect()
    }
}

impl IntoIterator for ReactionNetwork {
    type Item = Reaction;
    type IntoIter = std::vec::IntoIter<Reaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.reactions.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReactionNetwork {
    type Item = &'a Reaction;
    type IntoIter = std::slice::Iter<'a, Reaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.reactions.iter()
    }
}

impl fmt::Display for ReactionNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, reaction) in self.reactions.iter().enumerate() {
            let kinetics = reaction.kinetics();
            write!(f, "[{index}] {reaction}  (k = {}", kinetics.k())?;
            if kinetics.is_reversible() {
                write!(f, ", kr = {}", kinetics.kr())?;
            }
            writeln!(f, ", Ea = {} J/mol)", kinetics.ea())?;
        }
        Ok(())
    }
}
