//! Time integration of reaction networks
//!
//! The simulator advances a network with a fixed-step explicit Euler scheme
//! under mass-action kinetics. Each rate constant is corrected for the run
//! temperature with the Arrhenius factor `k * exp(-Ea / (R * T))` before the
//! walk starts, so the per-step work is one rate evaluation per reaction.
//!
//! Concentrations are clamped to zero after every step. The scheme is explicit
//! and can overshoot with stiff networks or coarse steps, so the clamp keeps
//! trajectories physical rather than accurate. Halve
//! [`SimulationParameters::dt`] until the output stops changing.

mod euler;
pub mod trajectory;

use std::collections::{BTreeSet, HashMap};

use log::debug;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{InitialConcentrations, ReactionNetwork, Species};
use euler::EulerIntegrator;
pub use trajectory::Trajectory;

/// Universal gas constant in J/(mol K).
pub const GAS_CONSTANT: f64 = 8.314;
/// Default run temperature in Kelvin.
pub const DEFAULT_TEMPERATURE: f64 = 298.15;
/// Default integration step in seconds.
pub const DEFAULT_TIME_STEP: f64 = 0.1;
/// Default simulated horizon in seconds.
pub const DEFAULT_HORIZON: f64 = 50.0;

/// Errors produced when a simulation is configured or run.
#[derive(Error, Debug, Clone)]
pub enum SimulationError {
    #[error("time step must be positive and finite, got {dt}")]
    InvalidTimeStep { dt: f64 },
    #[error("time horizon must be non-negative and finite, got {t_max}")]
    InvalidHorizon { t_max: f64 },
    #[error(
        "reaction `{reaction}` uses species {species} which is not in the simulated species list"
    )]
    UndeclaredSpecies { species: Species, reaction: String },
}

/// Settings for a single integration run.
///
/// # Example
///
/// ```
/// use kinetsol::simulator::SimulationParameters;
///
/// let params = SimulationParameters::new(0.05, 20.0, 310.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Integration step in seconds
    pub dt: f64,
    /// End of the simulated interval in seconds
    pub t_max: f64,
    /// Run temperature in Kelvin
    pub temperature: f64,
    /// Gas constant used in the Arrhenius correction, J/(mol K)
    pub gas_constant: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            dt: DEFAULT_TIME_STEP,
            t_max: DEFAULT_HORIZON,
            temperature: DEFAULT_TEMPERATURE,
            gas_constant: GAS_CONSTANT,
        }
    }
}

impl SimulationParameters {
    pub fn new(dt: f64, t_max: f64, temperature: f64) -> Self {
        Self {
            dt,
            t_max,
            temperature,
            gas_constant: GAS_CONSTANT,
        }
    }

    /// Override the gas constant, e.g. to work in other energy units
    pub fn with_gas_constant(mut self, gas_constant: f64) -> Self {
        self.gas_constant = gas_constant;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Checks that the grid the parameters describe is finite and non-empty.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimulationError::InvalidTimeStep { dt: self.dt });
        }
        if !self.t_max.is_finite() || self.t_max < 0.0 {
            return Err(SimulationError::InvalidHorizon { t_max: self.t_max });
        }
        Ok(())
    }
}

/// Builds the time grid `0, dt, 2*dt, ...` up to and including the first
/// point at or past `t_max`.
///
/// Points are computed as `step * dt` rather than by accumulation so the
/// grid does not drift over long horizons.
pub(crate) fn time_grid(dt: f64, t_max: f64) -> Vec<f64> {
    let mut times = vec![0.0];
    let mut step = 0usize;
    let mut last = 0.0;
    while last < t_max {
        step += 1;
        last = step as f64 * dt;
        times.push(last);
    }
    times
}

/// Integrates `network` from `initials` over the grid described by `params`.
///
/// The trajectory columns are the sorted, deduplicated `species` list. Species
/// missing from `initials` start at zero. Every species a reaction mentions
/// must appear in `species`, otherwise the run is rejected with
/// [`SimulationError::UndeclaredSpecies`].
pub fn simulate(
    species: &[Species],
    network: &ReactionNetwork,
    initials: &InitialConcentrations,
    params: &SimulationParameters,
) -> Result<Trajectory, SimulationError> {
    params.validate()?;

    let columns: Vec<Species> = species
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let index: HashMap<Species, usize> =
        columns.iter().enumerate().map(|(i, s)| (*s, i)).collect();

    let integrator = EulerIntegrator::new(network, &index, params)?;
    let initial = DVector::from_iterator(
        columns.len(),
        columns.iter().map(|s| initials.get(s).copied().unwrap_or(0.0)),
    );
    let times = time_grid(params.dt, params.t_max);
    debug!(
        "simulating {} reactions over {} species and {} time points",
        network.len(),
        columns.len(),
        times.len()
    );

    let states = integrator.solve(initial, &times);
    Ok(Trajectory::new(columns, times, states))
}
