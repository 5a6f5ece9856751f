//! Time-ordered event queue
//!
//! A min-priority queue of [`Event`]s keyed by time. Events scheduled for the
//! same minute come back out in the order they were pushed.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::events::Event;
use crate::simulation::{SimulationError, SimulationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    event: Event,
    sequence: u64,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by time, then insertion order.
        other
            .event
            .time()
            .cmp(&self.event.time())
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending events of a single simulation run
#[derive(Debug, Default)]
pub struct EventQueue {
    events: BinaryHeap<Scheduled>,
    next_sequence: u64,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an event
    pub fn push(&mut self, event: Event) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.events.push(Scheduled { event, sequence });
    }

    /// Remove and return the earliest event
    pub fn pop(&mut self) -> SimulationResult<Event> {
        self.events.pop().map(|scheduled| scheduled.event).ok_or(SimulationError::EmptyQueue)
    }

    /// Whether no events are pending
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Drop every pending event
    pub fn clear(&mut self) {
        self.events.clear();
        self.next_sequence = 0;
    }
}
