use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Arrival,
    Departure,
}

/// Payload carried by departure events: how long the service took and when
/// the packet it completes originally arrived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepartureInfo {
    pub service_time: f64,
    pub enqueued_at: f64,
}

/// One scheduled event. Immutable once created; owned by the clock until
/// popped. `server` is the station the packet was routed to when the event
/// was scheduled.
#[derive(Debug, Clone, Copy)]
pub struct Event {
    pub timestamp: f64,
    pub kind: EventKind,
    pub server: usize,
    pub departure: Option<DepartureInfo>,
    seq: u64,
}

impl Event {
    /// Insertion sequence number, assigned by the clock. Breaks timestamp
    /// ties in insertion order.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp.total_cmp(&other.timestamp).is_eq() && self.seq == other.seq
    }
}

impl Eq for Event {}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap: earliest timestamp
        // first, lowest sequence number among equal timestamps.
        other
            .timestamp
            .total_cmp(&self.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event most recently popped by the runner, visible to systems.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

/// Virtual-time event scheduler: a min-priority queue of pending events plus
/// the current simulation time. Events are never cancelled or reordered once
/// scheduled.
#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: f64,
    next_seq: u64,
    events: BinaryHeap<Event>,
}

impl SimulationClock {
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn schedule_at(
        &mut self,
        timestamp: f64,
        kind: EventKind,
        server: usize,
        departure: Option<DepartureInfo>,
    ) {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        let event = Event {
            timestamp,
            kind,
            server,
            departure,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.events.push(event);
    }

    /// Pops the earliest pending event and advances the clock to its
    /// timestamp. Returns `None` once the queue is empty.
    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    pub fn next_event_time(&self) -> Option<f64> {
        self.events.peek().map(|e| e.timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pops_events_in_time_order() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(10.0, EventKind::Arrival, 0, None);
        clock.schedule_at(5.0, EventKind::Arrival, 1, None);
        clock.schedule_at(20.0, EventKind::Arrival, 0, None);

        let first = clock.pop_next().expect("first event");
        assert_eq!(first.timestamp, 5.0);
        assert_eq!(first.server, 1);
        assert_eq!(clock.now(), 5.0);

        let second = clock.pop_next().expect("second event");
        assert_eq!(second.timestamp, 10.0);
        assert_eq!(clock.now(), 10.0);

        let third = clock.pop_next().expect("third event");
        assert_eq!(third.timestamp, 20.0);
        assert_eq!(clock.now(), 20.0);

        assert!(clock.pop_next().is_none());
        assert!(clock.is_empty());
    }

    #[test]
    fn equal_timestamps_pop_in_insertion_order() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(3.0, EventKind::Arrival, 0, None);
        clock.schedule_at(3.0, EventKind::Arrival, 1, None);
        clock.schedule_at(3.0, EventKind::Arrival, 2, None);

        let order: Vec<usize> = std::iter::from_fn(|| clock.pop_next())
            .map(|e| e.server)
            .collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn departure_payload_survives_the_heap() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(
            2.5,
            EventKind::Departure,
            0,
            Some(DepartureInfo {
                service_time: 1.5,
                enqueued_at: 1.0,
            }),
        );

        let event = clock.pop_next().expect("event");
        assert_eq!(event.kind, EventKind::Departure);
        let departure = event.departure.expect("departure payload");
        assert_eq!(departure.service_time, 1.5);
        assert_eq!(departure.enqueued_at, 1.0);
    }

    #[test]
    fn interleaved_schedule_and_pop_keeps_ordering() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(1.0, EventKind::Arrival, 0, None);
        clock.schedule_at(4.0, EventKind::Arrival, 0, None);

        assert_eq!(clock.pop_next().expect("event").timestamp, 1.0);
        clock.schedule_at(2.0, EventKind::Departure, 0, None);
        assert_eq!(clock.pop_next().expect("event").timestamp, 2.0);
        assert_eq!(clock.pop_next().expect("event").timestamp, 4.0);
        assert_eq!(clock.len(), 0);
    }
}
