pub mod equation;
pub mod network;
pub mod reaction;
pub mod species;
pub use equation::{
    collect_species, parse_equation, parse_side, parse_species, Arrow, EquationError,
    ParsedEquation, MAX_COEFFICIENT,
};
pub use network::{
    build_network, NetworkBuild, ReactionNetwork, ReactionSpec, SkippedReaction,
    DEFAULT_ACTIVATION_ENERGY, DEFAULT_RATE_CONSTANT, REVERSE_RATE_RATIO,
};
pub use reaction::{Kinetics, Reaction};
pub use species::{InitialConcentrations, Species};
