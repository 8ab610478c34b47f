use crate::metrics::RunMetrics;
use crate::parameters::ParameterSet;

pub(crate) fn export_to_csv_impl(
    results: &[RunMetrics],
    parameter_sets: &[ParameterSet],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    if results.len() != parameter_sets.len() {
        return Err(format!(
            "Results length ({}) doesn't match parameter_sets length ({})",
            results.len(),
            parameter_sets.len()
        )
        .into());
    }

    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "experiment_id",
        "run_id",
        "seed",
        "runtime",
        "arrival_rate",
        "num_servers",
        "routing_weights",
        "capacities",
        "service_rates",
        "serviced_count",
        "dropped_count",
        "offered_count",
        "drop_ratio",
        "mean_wait_time",
        "mean_service_time",
        "last_event_at",
        "events_processed",
    ])?;

    for (result, param_set) in results.iter().zip(parameter_sets.iter()) {
        let params = &param_set.params;
        wtr.write_record([
            &param_set.experiment_id,
            &param_set.run_id.to_string(),
            &param_set.seed.to_string(),
            &params.runtime.to_string(),
            &params.arrival_rate.to_string(),
            &params.num_servers().to_string(),
            &join_values(params.routing_weights.iter()),
            &join_values(params.servers.iter().map(|s| s.capacity)),
            &join_values(params.servers.iter().map(|s| s.service_rate)),
            &result.serviced_count.to_string(),
            &result.dropped_count.to_string(),
            &result.offered_count.to_string(),
            &result.drop_ratio.to_string(),
            &result.mean_wait_time.to_string(),
            &result.mean_service_time.to_string(),
            &result.last_event_at.to_string(),
            &result.events_processed.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Vector-valued parameters land in a single CSV cell, ';'-separated.
fn join_values<T: ToString>(values: impl Iterator<Item = T>) -> String {
    values
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterSpace;
    use tempfile::NamedTempFile;

    #[test]
    fn csv_rows_pair_parameters_with_results() {
        let sets = ParameterSpace::grid()
            .arrival_rates(vec![1.0, 2.0])
            .generate();
        let results: Vec<RunMetrics> = sets
            .iter()
            .map(|set| crate::runner::run_single_simulation(set))
            .collect();

        let file = NamedTempFile::new().unwrap();
        crate::export::export_to_csv(&results, &sets, file.path()).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("experiment_id,run_id,seed"));
        assert!(lines[1].contains("grid"));
    }

    #[test]
    fn mismatched_lengths_error() {
        let sets = ParameterSpace::grid().generate();
        let file = NamedTempFile::new().unwrap();
        let result = crate::export::export_to_csv(
            &[crate::runner::run_single_simulation(&sets[0])],
            &[],
            file.path(),
        );
        assert!(result.is_err());
    }
}
