use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::metrics::RunMetrics;

pub(crate) fn export_to_parquet_impl(
    results: &[RunMetrics],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let batch = build_record_batch(results)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

fn build_record_batch(results: &[RunMetrics]) -> Result<RecordBatch, arrow::error::ArrowError> {
    let schema = Arc::new(parquet_schema());
    let arrays = build_arrays(results);

    RecordBatch::try_new(schema, arrays)
}

fn parquet_schema() -> Schema {
    Schema::new(vec![
        Field::new("serviced_count", DataType::UInt64, false),
        Field::new("dropped_count", DataType::UInt64, false),
        Field::new("offered_count", DataType::UInt64, false),
        Field::new("drop_ratio", DataType::Float64, false),
        Field::new("mean_wait_time", DataType::Float64, false),
        Field::new("mean_service_time", DataType::Float64, false),
        Field::new("last_event_at", DataType::Float64, false),
        Field::new("events_processed", DataType::UInt64, false),
    ])
}

fn build_arrays(results: &[RunMetrics]) -> Vec<ArrayRef> {
    vec![
        Arc::new(UInt64Array::from(
            results.iter().map(|r| r.serviced_count).collect::<Vec<_>>(),
        )),
        Arc::new(UInt64Array::from(
            results.iter().map(|r| r.dropped_count).collect::<Vec<_>>(),
        )),
        Arc::new(UInt64Array::from(
            results.iter().map(|r| r.offered_count).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            results.iter().map(|r| r.drop_ratio).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            results.iter().map(|r| r.mean_wait_time).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            results
                .iter()
                .map(|r| r.mean_service_time)
                .collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            results.iter().map(|r| r.last_event_at).collect::<Vec<_>>(),
        )),
        Arc::new(UInt64Array::from(
            results
                .iter()
                .map(|r| r.events_processed)
                .collect::<Vec<_>>(),
        )),
    ]
}
