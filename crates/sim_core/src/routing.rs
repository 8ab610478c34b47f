//! Weighted-random routing of packets to servers.

use bevy_ecs::prelude::Resource;
use rand::Rng;

/// Fixed probability vector over the servers, with precomputed cumulative
/// weights for sampling. Weights are treated as relative; the CLI contract
/// enforces that they sum to 1.
#[derive(Debug, Clone, Resource)]
pub struct RoutingTable {
    weights: Vec<f64>,
    cumulative: Vec<f64>,
}

impl RoutingTable {
    pub fn new(weights: Vec<f64>) -> Self {
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut total = 0.0;
        for &weight in &weights {
            total += weight;
            cumulative.push(total);
        }
        Self {
            weights,
            cumulative,
        }
    }

    /// One weighted draw over the server indices. Consumes exactly one
    /// uniform from the stream. Returns `None` when the table is empty or
    /// all weights are zero.
    pub fn select_server<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let total = self.cumulative.last().copied()?;
        if total <= 0.0 {
            return None;
        }
        let r: f64 = rng.gen_range(0.0..total);
        let index = self
            .cumulative
            .partition_point(|&w| w <= r)
            .min(self.weights.len() - 1);
        Some(index)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
