//! Run statistics and reporting
//!
//! This module contains the summary returned at the end of a run.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{NeighborhoodId, RunId, SimTime};

/// Counters accumulated while events are processed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    /// Events popped from the queue and applied
    pub events_processed: u64,
    /// Repairs that drew the long duration
    pub long_repairs: u64,
    /// Minutes spent travelling between neighborhoods
    pub travel_minutes: SimTime,
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Identifier of the run
    pub run_id: RunId,
    /// Wall-clock time when processing started
    pub started_at: DateTime<Utc>,
    /// Wall-clock time when the queue drained
    pub finished_at: DateTime<Utc>,
    /// Crew size
    pub technician_count: usize,
    /// Simulated minutes from start to the last processed event
    pub duration_minutes: SimTime,
    /// Repairs undertaken per technician index
    pub completed_by_technician: Vec<u32>,
    /// Neighborhoods in the order the crew serviced them, start first
    pub visit_order: Vec<NeighborhoodId>,
    /// Event and travel counters
    pub counters: RunCounters,
}

impl RunReport {
    /// Total repairs across the crew
    pub fn total_completed(&self) -> u64 {
        self.completed_by_technician.iter().map(|&c| u64::from(c)).sum()
    }

    /// Number of neighborhoods the crew serviced, including the start
    pub fn neighborhoods_visited(&self) -> usize {
        self.visit_order.len()
    }

    /// Mean repairs per technician
    pub fn average_per_technician(&self) -> f64 {
        if self.technician_count == 0 {
            0.0
        } else {
            self.total_completed() as f64 / self.technician_count as f64
        }
    }

    /// Largest minus smallest per-technician count
    pub fn workload_spread(&self) -> u32 {
        let max = self.completed_by_technician.iter().max().copied().unwrap_or(0);
        let min = self.completed_by_technician.iter().min().copied().unwrap_or(0);
        max - min
    }

    /// Real time the run took
    pub fn wall_clock(&self) -> Duration {
        self.finished_at.signed_duration_since(self.started_at)
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run {}", self.run_id)?;
        writeln!(
            f,
            "  Duration: {} minutes ({}h {:02}m)",
            self.duration_minutes,
            self.duration_minutes / 60,
            self.duration_minutes % 60
        )?;
        writeln!(f, "  Neighborhoods visited: {}", self.neighborhoods_visited())?;
        writeln!(f, "  Travel: {} minutes", self.counters.travel_minutes)?;
        writeln!(
            f,
            "  Repairs: {} ({} long), {} events processed",
            self.total_completed(),
            self.counters.long_repairs,
            self.counters.events_processed
        )?;
        for (technician, completed) in self.completed_by_technician.iter().enumerate() {
            writeln!(f, "  Technician {}: {}", technician, completed)?;
        }
        Ok(())
    }
}
