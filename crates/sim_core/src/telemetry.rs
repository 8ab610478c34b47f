//! Simulation statistics: running totals plus the end-of-run summary.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::clock::DepartureInfo;

/// Running totals, updated incrementally as events are processed. Counters
/// only ever grow; `last_event_at` tracks the timestamp of the most recently
/// popped event, so its final value is the timestamp of the last event of the
/// run, horizon or not.
#[derive(Debug, Default, Resource)]
pub struct SimStats {
    pub serviced_count: u64,
    pub dropped_count: u64,
    pub wait_time_total: f64,
    pub service_time_total: f64,
    pub last_event_at: f64,
}

impl SimStats {
    /// Called by the runner for every popped event.
    pub fn observe_event(&mut self, timestamp: f64) {
        self.last_event_at = timestamp;
    }

    pub fn record_dropped(&mut self) {
        self.dropped_count += 1;
    }

    /// Accounts one completed service. The wait is the span from the packet's
    /// arrival to the start of its service, clamped at zero against
    /// floating-point underflow in the zero-wait case.
    pub fn record_departure(&mut self, departed_at: f64, departure: &DepartureInfo) {
        self.serviced_count += 1;
        self.service_time_total += departure.service_time;
        let wait = (departed_at - departure.service_time) - departure.enqueued_at;
        self.wait_time_total += wait.max(0.0);
    }

    pub fn snapshot(&self) -> StatsSummary {
        let (mean_wait_time, mean_service_time) = if self.serviced_count > 0 {
            (
                self.wait_time_total / self.serviced_count as f64,
                self.service_time_total / self.serviced_count as f64,
            )
        } else {
            (0.0, 0.0)
        };
        StatsSummary {
            serviced_count: self.serviced_count,
            dropped_count: self.dropped_count,
            last_event_at: self.last_event_at,
            mean_wait_time,
            mean_service_time,
        }
    }
}

/// Read-only view of a finished (or in-flight) run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSummary {
    pub serviced_count: u64,
    pub dropped_count: u64,
    pub last_event_at: f64,
    pub mean_wait_time: f64,
    pub mean_service_time: f64,
}
