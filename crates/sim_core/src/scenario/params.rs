use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;

/// Relative tolerance for the routing-weight sum check.
const WEIGHT_SUM_REL_TOL: f64 = 1e-12;
/// Absolute tolerance for the routing-weight sum check.
const WEIGHT_SUM_ABS_TOL: f64 = 1e-15;

/// Horizon in simulation time. No new external arrivals are generated at or
/// past this timestamp; departures and already-queued packets keep draining
/// beyond it.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimulationEndTime(pub f64);

/// Per-server queueing parameters: how many packets may wait (the one in
/// service excluded) and the service rate μ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServerParams {
    pub capacity: usize,
    pub service_rate: f64,
}

/// Immutable configuration for one simulation run, built once by the caller
/// and handed to [`build_scenario`](crate::scenario::build_scenario).
///
/// A `runtime` of zero is valid at this level: the seeded arrival and its
/// departure chain still run, no further arrivals are generated. Rates are
/// assumed positive; the CLI front-end is responsible for rejecting a zero
/// duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// Horizon: arrival generation stops once an arrival at or past this
    /// time is processed.
    pub runtime: f64,
    /// Shared λ of the external arrival process, copied into every server's
    /// transmission rate.
    pub arrival_rate: f64,
    /// One routing weight per server, each in [0, 1], summing to 1.
    pub routing_weights: Vec<f64>,
    pub servers: Vec<ServerParams>,
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            runtime: 100.0,
            arrival_rate: 1.0,
            routing_weights: vec![1.0],
            servers: vec![ServerParams {
                capacity: 10,
                service_rate: 1.0,
            }],
            seed: None,
        }
    }
}

impl ScenarioParams {
    /// Uniformly-weighted scenario where every server shares the same
    /// capacity and service rate.
    pub fn uniform(
        num_servers: usize,
        runtime: f64,
        arrival_rate: f64,
        capacity: usize,
        service_rate: f64,
    ) -> Self {
        Self {
            runtime,
            arrival_rate,
            routing_weights: vec![1.0 / num_servers as f64; num_servers],
            servers: vec![
                ServerParams {
                    capacity,
                    service_rate,
                };
                num_servers
            ],
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_runtime(mut self, runtime: f64) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn num_servers(&self) -> usize {
        self.servers.len()
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.servers.is_empty() {
            return Err(ScenarioError::NoServers);
        }
        if self.routing_weights.len() != self.servers.len() {
            return Err(ScenarioError::WeightCountMismatch {
                servers: self.servers.len(),
                weights: self.routing_weights.len(),
            });
        }
        for (index, &value) in self.routing_weights.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScenarioError::ProbabilityOutOfRange { index, value });
            }
        }
        let sum: f64 = self.routing_weights.iter().sum();
        if !weight_sum_is_close(sum) {
            return Err(ScenarioError::ProbabilityNotNormalized { sum });
        }
        Ok(())
    }
}

fn weight_sum_is_close(sum: f64) -> bool {
    (sum - 1.0).abs() <= WEIGHT_SUM_ABS_TOL.max(WEIGHT_SUM_REL_TOL * sum.abs().max(1.0))
}
