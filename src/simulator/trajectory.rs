//! The result table produced by a simulation run.

use std::fmt;

use nalgebra::DVector;
use ndarray::{Array2, ArrayView1};

use crate::data::Species;

/// Concentration trajectory over a uniform time grid.
///
/// Rows are time points and columns are species in lexicographic order, so
/// every per-species series has exactly one value per grid point. A
/// trajectory is the sole artifact of a run and is replaced wholesale by
/// the next run.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    species: Vec<Species>,
    times: Vec<f64>,
    table: Array2<f64>,
}

impl Trajectory {
    pub(crate) fn new(species: Vec<Species>, times: Vec<f64>, states: Vec<DVector<f64>>) -> Self {
        let mut table = Array2::zeros((times.len(), species.len()));
        for (row, state) in states.iter().enumerate() {
            for (column, value) in state.iter().enumerate() {
                table[[row, column]] = *value;
            }
        }
        Self {
            species,
            times,
            table,
        }
    }

    /// Time grid of the run
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Species columns, sorted lexicographically
    pub fn species(&self) -> &[Species] {
        &self.species
    }

    /// Number of time points
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when the run produced no time points
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Concentration series of one species, aligned with [`times`](Self::times)
    pub fn concentrations(&self, species: Species) -> Option<ArrayView1<'_, f64>> {
        let column = self.species.binary_search(&species).ok()?;
        Some(self.table.column(column))
    }

    /// State row at one grid index
    pub fn state_at(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.table.nrows()).then(|| self.table.row(index))
    }

    /// State row at the last grid point
    pub fn final_state(&self) -> Option<ArrayView1<'_, f64>> {
        self.state_at(self.len().checked_sub(1)?)
    }

    /// Full table, rows are time points and columns are species
    pub fn table(&self) -> &Array2<f64> {
        &self.table
    }

    /// (time, state row) pairs in grid order
    pub fn rows(&self) -> impl Iterator<Item = (f64, ArrayView1<'_, f64>)> + '_ {
        self.times.iter().copied().zip(self.table.outer_iter())
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>10}", "time")?;
        for species in &self.species {
            write!(f, "{:>12}", format!("[{species}]"))?;
        }
        writeln!(f)?;
        for (time, state) in self.rows() {
            write!(f, "{time:>10.4}")?;
            for value in state.iter() {
                write!(f, "{value:>12.6}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
