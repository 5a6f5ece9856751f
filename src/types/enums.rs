//! Enumeration types for the crew simulator
//!
//! This module contains the event kinds driving the state machine and the
//! repair length classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of occurrences processed by the simulation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A technician begins repairing a hotspot
    WorkStarted,
    /// A technician finishes a repair and becomes idle
    WorkFinished,
    /// The whole crew has arrived in a new neighborhood
    NeighborhoodChanged,
}

impl EventKind {
    /// Whether events of this kind always name a technician
    pub fn is_technician_specific(&self) -> bool {
        !matches!(self, EventKind::NeighborhoodChanged)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::WorkStarted => write!(f, "Work Started"),
            EventKind::WorkFinished => write!(f, "Work Finished"),
            EventKind::NeighborhoodChanged => write!(f, "Neighborhood Changed"),
        }
    }
}

/// Length class of a single repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepairLength {
    /// The common case
    Short,
    /// The occasional complicated repair
    Long,
}

impl fmt::Display for RepairLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairLength::Short => write!(f, "Short"),
            RepairLength::Long => write!(f, "Long"),
        }
    }
}
