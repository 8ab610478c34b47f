//! Event rate tracking: how many events of each kind a run processed.

use std::collections::HashMap;
use std::time::Instant;

use bevy_ecs::prelude::Resource;

use crate::clock::EventKind;

/// Event processing metrics, recorded by the runner on every pop.
#[derive(Debug, Default, Resource)]
pub struct EventMetrics {
    /// Total events processed.
    pub events_processed: u64,
    /// Wall-clock start, set on the first event.
    pub start_time: Option<Instant>,
    /// Events per event kind.
    pub events_by_kind: HashMap<EventKind, u64>,
}

impl EventMetrics {
    pub fn record_event(&mut self, kind: EventKind) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
        self.events_processed += 1;
        *self.events_by_kind.entry(kind).or_insert(0) += 1;
    }

    pub fn count(&self, kind: EventKind) -> u64 {
        self.events_by_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Wall-clock event throughput (events per second).
    pub fn events_per_second(&self) -> f64 {
        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                self.events_processed as f64 / elapsed
            } else {
                0.0
            }
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_events_by_kind() {
        let mut metrics = EventMetrics::default();
        metrics.record_event(EventKind::Arrival);
        metrics.record_event(EventKind::Arrival);
        metrics.record_event(EventKind::Departure);

        assert_eq!(metrics.events_processed, 3);
        assert_eq!(metrics.count(EventKind::Arrival), 2);
        assert_eq!(metrics.count(EventKind::Departure), 1);
        assert!(metrics.start_time.is_some());
    }

    #[test]
    fn unseen_kind_counts_zero() {
        let metrics = EventMetrics::default();
        assert_eq!(metrics.count(EventKind::Departure), 0);
        assert_eq!(metrics.events_per_second(), 0.0);
    }
}
