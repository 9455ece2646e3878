use thiserror::Error;

use crate::data::EquationError;
use crate::simulator::SimulationError;

#[derive(Error, Debug, Clone)]
pub enum KinetsolError {
    #[error(transparent)]
    EquationError(#[from] EquationError),
    #[error(transparent)]
    SimulationError(#[from] SimulationError),
}
