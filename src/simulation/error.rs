//! Error types and handling
//!
//! This module contains error types and error handling for the simulation.
//! None of these errors are retried: a run that hits one is abandoned and the
//! error is handed back to the caller.

use thiserror::Error;

use crate::types::{ConfigValidationError, NeighborhoodId, SimTime};

/// Errors that can occur during simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Caller supplied an unusable start neighborhood, crew size or graph element
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A neighborhood identifier is not a vertex of the graph
    #[error("Unknown neighborhood: {0}")]
    UnknownNeighborhood(NeighborhoodId),

    /// The graph lacks a distance the engine needs
    #[error("Missing edge between {from} and {to}")]
    MissingEdge {
        /// Neighborhood the crew is leaving
        from: NeighborhoodId,
        /// Candidate destination
        to: NeighborhoodId,
    },

    /// No destination could be selected from the current neighborhood
    #[error("No path from {0}: no unvisited neighborhood left to select")]
    NoPath(NeighborhoodId),

    /// The event queue was popped while empty
    #[error("Event queue is empty")]
    EmptyQueue,

    /// A scheduled time does not fit the simulated clock
    #[error("Simulated clock overflow: {delay} minutes after minute {time}")]
    ClockOverflow {
        /// Minute the delay starts from
        time: SimTime,
        /// Delay that could not be added
        delay: SimTime,
    },

    /// World state bookkeeping went out of bounds
    #[error("Broken simulation invariant: {0}")]
    BrokenInvariant(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    Configuration(#[from] ConfigValidationError),
}

impl SimulationError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a broken invariant error
    pub fn broken_invariant(msg: impl Into<String>) -> Self {
        Self::BrokenInvariant(msg.into())
    }

    /// Whether the error means the engine itself misbehaved rather than its inputs
    pub fn is_fatal(&self) -> bool {
        matches!(self, SimulationError::EmptyQueue | SimulationError::BrokenInvariant(_))
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::InvalidInput(_) => "Input",
            SimulationError::UnknownNeighborhood(_) => "Input",
            SimulationError::MissingEdge { .. } => "Graph",
            SimulationError::NoPath(_) => "Graph",
            SimulationError::EmptyQueue => "Engine",
            SimulationError::ClockOverflow { .. } => "Engine",
            SimulationError::BrokenInvariant(_) => "Engine",
            SimulationError::Configuration(_) => "Configuration",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
