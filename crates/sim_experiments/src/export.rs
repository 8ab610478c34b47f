//! Result export and analysis utilities.
//!
//! Exporters for experiment results (CSV with parameters, JSON, Parquet) and
//! a small ranking helper for picking the best-behaved configuration.

use std::path::Path;

use crate::metrics::RunMetrics;
use crate::parameters::ParameterSet;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/parquet.rs"]
mod parquet;
#[path = "export/ranking.rs"]
mod ranking;
#[path = "export/writer_utils.rs"]
mod writer_utils;

pub use ranking::RankingWeights;

/// Export simulation results to Parquet format.
///
/// Creates a Parquet file with one column per metric in [`RunMetrics`].
///
/// # Errors
///
/// Returns an error if file creation or Parquet writing fails, or if
/// `results` is empty.
pub fn export_to_parquet(
    results: &[RunMetrics],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    parquet::export_to_parquet_impl(results, file)
}

/// Export simulation results to JSON format (an array of result objects).
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn export_to_json(
    results: &[RunMetrics],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(results, file)
}

/// Export simulation results with their parameters to CSV format.
///
/// Parameters and results are paired by index (`results[i]` corresponds to
/// `parameter_sets[i]`).
///
/// # Errors
///
/// Returns an error if file creation or CSV writing fails, or if the two
/// slices differ in length.
pub fn export_to_csv(
    results: &[RunMetrics],
    parameter_sets: &[ParameterSet],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(results, parameter_sets, file)
}

/// Index of the best result under the given weights (lowest combined drop
/// ratio and mean wait). `None` for empty results.
pub fn find_best_result_index(
    results: &[RunMetrics],
    weights: &RankingWeights,
) -> Option<usize> {
    ranking::find_best_index_impl(results, weights)
}
