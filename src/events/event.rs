//! Simulation events
//!
//! This module contains the immutable time-stamped event record consumed by the
//! simulation engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{EventKind, SimTime, TechnicianIndex};

/// A time-stamped occurrence in the simulation
///
/// Events are immutable once created. `technician` is `None` only for
/// [`EventKind::NeighborhoodChanged`], which concerns the whole crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    time: SimTime,
    kind: EventKind,
    technician: Option<TechnicianIndex>,
}

impl Event {
    /// A technician begins repairing a hotspot at `time`
    pub fn work_started(time: SimTime, technician: TechnicianIndex) -> Self {
        Self { time, kind: EventKind::WorkStarted, technician: Some(technician) }
    }

    /// A technician finishes the current repair at `time`
    pub fn work_finished(time: SimTime, technician: TechnicianIndex) -> Self {
        Self { time, kind: EventKind::WorkFinished, technician: Some(technician) }
    }

    /// The crew arrives in the next neighborhood at `time`
    pub fn neighborhood_changed(time: SimTime) -> Self {
        Self { time, kind: EventKind::NeighborhoodChanged, technician: None }
    }

    /// Simulation minute at which the event occurs
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Kind of occurrence
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Technician concerned by the event, if any
    pub fn technician(&self) -> Option<TechnicianIndex> {
        self.technician
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.technician {
            Some(technician) => {
                write!(f, "[t={}] {} (technician {})", self.time, self.kind, technician)
            }
            None => write!(f, "[t={}] {}", self.time, self.kind),
        }
    }
}
