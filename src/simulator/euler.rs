use std::collections::HashMap;

use nalgebra::DVector;

use crate::data::{Reaction, ReactionNetwork, Species};

use super::{SimulationError, SimulationParameters};

/// One reaction with species resolved to state-vector indices and rate
/// constants already corrected for the run temperature.
struct IndexedReaction {
    forward_rate: f64,
    reverse_rate: f64,
    reactants: Vec<usize>,
    products: Vec<usize>,
    reactant_orders: Vec<(usize, i32)>,
    product_orders: Vec<(usize, i32)>,
}

impl IndexedReaction {
    fn resolve(
        reaction: &Reaction,
        index: &HashMap<Species, usize>,
        params: &SimulationParameters,
    ) -> Result<Self, SimulationError> {
        let position = |species: &Species| {
            index
                .get(species)
                .copied()
                .ok_or_else(|| SimulationError::UndeclaredSpecies {
                    species: *species,
                    reaction: reaction.to_string(),
                })
        };

        let reactants = reaction
            .reactants()
            .iter()
            .map(position)
            .collect::<Result<Vec<_>, _>>()?;
        let products = reaction
            .products()
            .iter()
            .map(position)
            .collect::<Result<Vec<_>, _>>()?;
        let reactant_orders = reaction
            .reactant_counts()
            .into_iter()
            .map(|(species, count)| position(&species).map(|i| (i, count as i32)))
            .collect::<Result<Vec<_>, _>>()?;
        let product_orders = reaction
            .product_counts()
            .into_iter()
            .map(|(species, count)| position(&species).map(|i| (i, count as i32)))
            .collect::<Result<Vec<_>, _>>()?;

        let kinetics = reaction.kinetics();
        Ok(Self {
            forward_rate: kinetics.forward_rate_at(params.temperature, params.gas_constant),
            reverse_rate: kinetics.reverse_rate_at(params.temperature, params.gas_constant),
            reactants,
            products,
            reactant_orders,
            product_orders,
        })
    }

    /// Mass-action net progress rate, forward minus reverse
    fn net_rate(&self, state: &DVector<f64>) -> f64 {
        let forward = self.forward_rate
            * self
                .reactant_orders
                .iter()
                .map(|(i, order)| state[*i].powi(*order))
                .product::<f64>();
        let reverse = self.reverse_rate
            * self
                .product_orders
                .iter()
                .map(|(i, order)| state[*i].powi(*order))
                .product::<f64>();
        forward - reverse
    }
}

/// Fixed-step explicit Euler stepper over an index-resolved network.
pub(crate) struct EulerIntegrator {
    reactions: Vec<IndexedReaction>,
    dt: f64,
}

impl EulerIntegrator {
    pub(crate) fn new(
        network: &ReactionNetwork,
        index: &HashMap<Species, usize>,
        params: &SimulationParameters,
    ) -> Result<Self, SimulationError> {
        let reactions = network
            .reactions()
            .iter()
            .map(|reaction| IndexedReaction::resolve(reaction, index, params))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            reactions,
            dt: params.dt,
        })
    }

    /// Accumulates the per-species rate of change from the previous state.
    ///
    /// Every occurrence in a flattened side contributes once, so a species
    /// with multiplicity n changes at n times the net reaction rate.
    fn deltas(&self, state: &DVector<f64>) -> DVector<f64> {
        let mut delta = DVector::zeros(state.len());
        for reaction in &self.reactions {
            let net = reaction.net_rate(state);
            for &i in &reaction.reactants {
                delta[i] -= net;
            }
            for &i in &reaction.products {
                delta[i] += net;
            }
        }
        delta
    }

    fn step(&self, state: &DVector<f64>) -> DVector<f64> {
        let delta = self.deltas(state);
        let mut next = state.clone();
        next.axpy(self.dt, &delta, 1.0);
        // the explicit scheme can overshoot below zero under large steps
        next.apply(|c| *c = c.max(0.0));
        next
    }

    /// Walks the grid, producing one state per time point.
    pub(crate) fn solve(&self, initial: DVector<f64>, times: &[f64]) -> Vec<DVector<f64>> {
        let mut states = Vec::with_capacity(times.len());
        if times.is_empty() {
            return states;
        }
        states.push(initial);
        for point in 1..times.len() {
            let next = self.step(&states[point - 1]);
            states.push(next);
        }
        states
    }
}
