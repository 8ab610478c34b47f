use crate::metrics::RunMetrics;

pub(crate) fn export_to_json_impl(
    results: &[RunMetrics],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(file, results)?;
    Ok(())
}
