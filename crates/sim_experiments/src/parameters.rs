//! Parameter variation framework for exploring simulation parameter space.
//!
//! Defines a grid over arrival rates, queue capacities, and service rates on
//! top of a base scenario, and expands it into concrete parameter sets for
//! parallel execution. Replications of the same combination differ only in
//! their seed.

use sim_core::scenario::ScenarioParams;

/// One concrete parameter combination, ready to run.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    pub experiment_id: String,
    pub run_id: usize,
    pub seed: u64,
    pub params: ScenarioParams,
}

impl ParameterSet {
    /// The scenario for this run, with the replication seed applied.
    pub fn scenario_params(&self) -> ScenarioParams {
        self.params.clone().with_seed(self.seed)
    }
}

/// Grid over simulation parameters. Dimensions left empty fall back to the
/// base scenario's value.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    base: ScenarioParams,
    experiment_id: String,
    arrival_rates: Vec<f64>,
    capacities: Vec<usize>,
    service_rates: Vec<f64>,
    replications: usize,
    base_seed: u64,
}

impl ParameterSpace {
    pub fn grid() -> Self {
        Self {
            base: ScenarioParams::default(),
            experiment_id: "grid".to_string(),
            arrival_rates: Vec::new(),
            capacities: Vec::new(),
            service_rates: Vec::new(),
            replications: 1,
            base_seed: 42,
        }
    }

    /// Base scenario the grid varies; also fixes the number of servers and
    /// the routing weights.
    pub fn base(mut self, base: ScenarioParams) -> Self {
        self.base = base;
        self
    }

    pub fn experiment_id(mut self, id: impl Into<String>) -> Self {
        self.experiment_id = id.into();
        self
    }

    pub fn arrival_rates(mut self, rates: Vec<f64>) -> Self {
        self.arrival_rates = rates;
        self
    }

    /// Queue capacity applied to every server of the base scenario.
    pub fn capacities(mut self, capacities: Vec<usize>) -> Self {
        self.capacities = capacities;
        self
    }

    /// Service rate applied to every server of the base scenario.
    pub fn service_rates(mut self, rates: Vec<f64>) -> Self {
        self.service_rates = rates;
        self
    }

    /// Seed-varied repetitions of every combination.
    pub fn replications(mut self, replications: usize) -> Self {
        self.replications = replications.max(1);
        self
    }

    pub fn base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Expand the grid into parameter sets (Cartesian product of all
    /// non-empty dimensions, times replications).
    pub fn generate(&self) -> Vec<ParameterSet> {
        // An empty dimension contributes a single "keep the base" slot so the
        // product never silently flattens a heterogeneous base scenario.
        let arrival_rates: Vec<Option<f64>> = expand_dimension(&self.arrival_rates);
        let capacities: Vec<Option<usize>> = expand_dimension(&self.capacities);
        let service_rates: Vec<Option<f64>> = expand_dimension(&self.service_rates);

        let mut sets = Vec::new();
        let mut run_id = 0;
        for &arrival_rate in &arrival_rates {
            for &capacity in &capacities {
                for &service_rate in &service_rates {
                    for _ in 0..self.replications {
                        let mut params = self.base.clone();
                        if let Some(arrival_rate) = arrival_rate {
                            params.arrival_rate = arrival_rate;
                        }
                        for server in &mut params.servers {
                            if let Some(capacity) = capacity {
                                server.capacity = capacity;
                            }
                            if let Some(service_rate) = service_rate {
                                server.service_rate = service_rate;
                            }
                        }
                        sets.push(ParameterSet {
                            experiment_id: self.experiment_id.clone(),
                            run_id,
                            seed: self.base_seed.wrapping_add(run_id as u64),
                            params,
                        });
                        run_id += 1;
                    }
                }
            }
        }
        sets
    }
}

fn expand_dimension<T: Copy>(values: &[T]) -> Vec<Option<T>> {
    if values.is_empty() {
        vec![None]
    } else {
        values.iter().copied().map(Some).collect()
    }
}
