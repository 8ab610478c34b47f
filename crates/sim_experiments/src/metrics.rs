//! Metrics extraction from completed simulation worlds.

use bevy_ecs::prelude::World;
use sim_core::clock::EventKind;
use sim_core::profiling::EventMetrics;
use sim_core::telemetry::SimStats;

/// Aggregated metrics from a single simulation run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RunMetrics {
    /// Packets that completed service.
    pub serviced_count: u64,
    /// Packets rejected at a full queue.
    pub dropped_count: u64,
    /// Externally generated arrivals (admitted or not).
    pub offered_count: u64,
    /// dropped / (serviced + dropped); 0 when nothing was offered.
    pub drop_ratio: f64,
    pub mean_wait_time: f64,
    pub mean_service_time: f64,
    /// Timestamp of the final event, i.e. when the network fully drained.
    pub last_event_at: f64,
    /// Total events the runner processed.
    pub events_processed: u64,
}

/// Extract metrics from a completed simulation world.
pub fn extract_metrics(world: &World) -> RunMetrics {
    let stats = world
        .get_resource::<SimStats>()
        .expect("SimStats resource not found");
    let summary = stats.snapshot();
    let events = world
        .get_resource::<EventMetrics>()
        .expect("EventMetrics resource not found");

    let resolved = summary.serviced_count + summary.dropped_count;
    let drop_ratio = if resolved > 0 {
        summary.dropped_count as f64 / resolved as f64
    } else {
        0.0
    };

    RunMetrics {
        serviced_count: summary.serviced_count,
        dropped_count: summary.dropped_count,
        offered_count: events.count(EventKind::Arrival),
        drop_ratio,
        mean_wait_time: summary.mean_wait_time,
        mean_service_time: summary.mean_service_time,
        last_event_at: summary.last_event_at,
        events_processed: events.events_processed,
    }
}

/// Average, median, and 90th percentile of a set of values, e.g. one metric
/// across replications.
pub fn summarize(values: &[f64]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let avg = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let median = if sorted.len() % 2 == 0 {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
    } else {
        sorted[sorted.len() / 2]
    };
    let p90_idx = ((sorted.len() - 1) as f64 * 0.9) as usize;
    let p90 = sorted[p90_idx.min(sorted.len() - 1)];

    (avg, median, p90)
}
