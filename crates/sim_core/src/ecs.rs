use std::collections::VecDeque;

use bevy_ecs::prelude::{Component, Entity, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Idle,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct Server {
    pub state: ServerState,
}

impl Server {
    pub fn idle() -> Self {
        Self {
            state: ServerState::Idle,
        }
    }
}

/// Rate profile of one station: `transmission_rate` is the λ of the external
/// arrival stream routed to it, `service_rate` is its μ.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct ServiceProfile {
    pub transmission_rate: f64,
    pub service_rate: f64,
}

/// Bounded FIFO of arrival timestamps for packets waiting behind the one in
/// service. The packet in service does not count against `capacity`.
/// `len() <= capacity()` holds at all times; an idle server has an empty
/// queue.
#[derive(Debug, Clone, Component)]
pub struct WaitQueue {
    waiting: VecDeque<f64>,
    capacity: usize,
}

impl WaitQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            waiting: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an arrival timestamp unless the queue is full. Returns whether
    /// the packet was admitted.
    pub fn try_enqueue(&mut self, arrived_at: f64) -> bool {
        if self.waiting.len() >= self.capacity {
            return false;
        }
        self.waiting.push_back(arrived_at);
        true
    }

    /// Removes and returns the oldest waiting arrival timestamp.
    pub fn dequeue(&mut self) -> Option<f64> {
        self.waiting.pop_front()
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.waiting.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Maps routing indices to server entities, in scenario order.
#[derive(Debug, Default, Resource)]
pub struct ServerRegistry(pub Vec<Entity>);

impl ServerRegistry {
    pub fn get(&self, index: usize) -> Option<Entity> {
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_queue_enforces_capacity() {
        let mut queue = WaitQueue::with_capacity(2);
        assert!(queue.try_enqueue(1.0));
        assert!(queue.try_enqueue(2.0));
        assert!(queue.is_full());
        assert!(!queue.try_enqueue(3.0));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn zero_capacity_queue_rejects_everything() {
        let mut queue = WaitQueue::with_capacity(0);
        assert!(queue.is_full());
        assert!(!queue.try_enqueue(1.0));
        assert!(queue.is_empty());
    }

    #[test]
    fn wait_queue_dequeues_in_fifo_order() {
        let mut queue = WaitQueue::with_capacity(3);
        assert!(queue.try_enqueue(1.0));
        assert!(queue.try_enqueue(2.0));
        assert!(queue.try_enqueue(3.0));

        assert_eq!(queue.dequeue(), Some(1.0));
        assert_eq!(queue.dequeue(), Some(2.0));
        assert!(queue.try_enqueue(4.0));
        assert_eq!(queue.dequeue(), Some(3.0));
        assert_eq!(queue.dequeue(), Some(4.0));
        assert_eq!(queue.dequeue(), None);
    }
}
