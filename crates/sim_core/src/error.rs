//! Validation errors surfaced before a simulation starts. Once a scenario
//! validates, the run itself cannot fail.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("at least one server is required")]
    NoServers,
    #[error("expected {servers} routing weights, got {weights}")]
    WeightCountMismatch { servers: usize, weights: usize },
    #[error("routing weight at index {index} is out of range: {value}")]
    ProbabilityOutOfRange { index: usize, value: f64 },
    #[error("routing weights sum to {sum}, expected 1")]
    ProbabilityNotNormalized { sum: f64 },
}
