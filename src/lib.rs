//! kinetsol is a library for simulating the kinetics of symbolic chemical
//! reaction networks.
//!
//! Reactions are written as plain equations over single-letter species, for
//! example `"2A + B -> C"` or `"A <-> B"`. The library parses them, assembles
//! a [`data::ReactionNetwork`], and integrates the mass-action rate equations
//! with temperature-corrected rate constants.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`data`] | Equation parsing, reactions, and network assembly |
//! | [`simulator`] | Fixed-step explicit Euler integration |
//! | [`equilibrium`] | Composition-preserving long-run estimates |
//!
//! # Example
//!
//! ```
//! use kinetsol::prelude::*;
//!
//! let specs = vec![
//!     ReactionSpec::new("A -> B", 0.1, 0.0),
//!     ReactionSpec::new("B <-> C", 0.05, 0.0),
//! ];
//! let network = build_network(&specs).into_network();
//! let species = network.species();
//!
//! let mut initials = InitialConcentrations::new();
//! initials.insert("A".parse()?, 1.0);
//!
//! let params = SimulationParameters::new(0.1, 1.0, 298.15);
//! let trajectory = simulate(&species, &network, &initials, &params)?;
//! assert_eq!(trajectory.len(), 11);
//! # Ok::<(), kinetsol::KinetsolError>(())
//! ```

pub mod data;
pub mod equilibrium;
pub mod error;
pub mod simulator;

pub use error::KinetsolError;

pub mod prelude {
    pub use crate::data::{
        build_network, collect_species, parse_equation, parse_species, InitialConcentrations,
        Kinetics, NetworkBuild, Reaction, ReactionNetwork, ReactionSpec, SkippedReaction, Species,
    };
    pub use crate::equilibrium::{estimate_equilibrium, EquilibriumEstimate, EquilibriumOptions};
    pub use crate::error::KinetsolError;
    pub use crate::simulator::{simulate, SimulationError, SimulationParameters, Trajectory};
}
