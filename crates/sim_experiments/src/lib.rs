//! Parallel experimentation framework for queueing-network parameter sweeps.
//!
//! This crate enables running multiple simulations in parallel with varying
//! parameters, extracting per-run metrics, and exporting the results to
//! analyze how arrival rates, queue capacities, and service rates affect
//! throughput, drops, and waiting times.
//!
//! # Quick Start
//!
//! ```no_run
//! use sim_experiments::{
//!     find_best_result_index, run_parallel_experiments, ParameterSpace, RankingWeights,
//! };
//!
//! // Define parameter space (grid search)
//! let space = ParameterSpace::grid()
//!     .arrival_rates(vec![1.0, 2.0, 4.0])
//!     .capacities(vec![0, 5, 20])
//!     .replications(3);
//!
//! // Generate parameter sets and run them in parallel
//! let parameter_sets = space.generate();
//! let results = run_parallel_experiments(parameter_sets, None);
//!
//! // Pick the configuration with the fewest drops and shortest waits
//! let best_idx = find_best_result_index(&results, &RankingWeights::default()).unwrap();
//! ```
//!
//! # Architecture
//!
//! - [`parameters`]: parameter grids and their expansion into run configs
//! - [`runner`]: parallel simulation execution using rayon
//! - [`metrics`]: metrics extraction from finished worlds
//! - [`export`]: result export to CSV/JSON/Parquet and ranking

pub mod export;
pub mod metrics;
pub mod parameters;
pub mod runner;

pub use export::{
    export_to_csv, export_to_json, export_to_parquet, find_best_result_index, RankingWeights,
};
pub use metrics::{extract_metrics, summarize, RunMetrics};
pub use parameters::{ParameterSet, ParameterSpace};
pub use runner::{run_parallel_experiments, run_single_simulation};
