//! Simulation events and the event queue
//!
//! This module contains the immutable [`Event`] record and the time-ordered
//! [`EventQueue`] that the engine drains during a run.
//!
//! # Usage Example
//!
//! ```rust
//! use hotspot_crew_simulator::events::*;
//!
//! let mut queue = EventQueue::new();
//! queue.push(Event::work_finished(10, 0));
//! queue.push(Event::work_started(0, 0));
//!
//! assert_eq!(queue.pop().unwrap().time(), 0);
//! assert_eq!(queue.pop().unwrap().time(), 10);
//! assert!(queue.is_empty());
//! ```

pub mod event;
pub mod queue;

// Re-export all public types for convenience
pub use event::*;
pub use queue::*;
