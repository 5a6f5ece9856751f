//! Hotspot Crew Simulator
//!
//! A discrete-event simulation of a fixed-size crew of technicians repairing
//! hotspots spread across the neighborhoods of a weighted graph.
//!
//! # Overview
//!
//! The crew services one neighborhood at a time. Each technician takes a
//! hotspot, repairs it (usually 10 minutes, occasionally 25), and then takes the
//! next hotspot in the same neighborhood after a short setup delay. Once the
//! neighborhood has no unassigned hotspots and every technician is idle, the
//! whole crew travels to the nearest neighborhood not yet visited. The run ends
//! when the event queue drains.
//!
//! ## Key Features
//!
//! - **Event-driven engine**: A time-ordered queue and a three-case state machine
//! - **Nearest-neighborhood policy**: Driven by the graph's edge weights
//! - **Injectable randomness**: Scripted outcomes for deterministic runs
//! - **Configurable timings**: Repair durations, setup delays and travel speed
//! - **Run reports**: Per-technician counts, visit order and travel totals
//!
//! ## Quick Start
//!
//! ```rust
//! use hotspot_crew_simulator::*;
//!
//! let mut graph = WeightedNeighborhoodGraph::new();
//! let start = graph.add_neighborhood(Neighborhood::new("Harlem", 4))?;
//! let next = graph.add_neighborhood(Neighborhood::new("Inwood", 3))?;
//! graph.add_edge(start, next, 2.5)?;
//!
//! let config = SimulationConfig { seed: Some(7), ..Default::default() };
//! let mut engine = SimulationEngine::new(graph, config)?;
//! engine.initialize(start, 2)?;
//!
//! let report = engine.run()?;
//! println!("Finished after {} minutes", report.duration_minutes);
//! assert_eq!(report.total_completed(), 7);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums and configuration
//! - [`events`]: Event records and the event queue
//! - [`neighborhood`]: Neighborhood records and the distance graph
//! - [`simulation`]: Engine, world state, selection policy, statistics and errors
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌─────────────┐
//! │   Types     │    │ Neighborhood │    │   Events    │
//! │             │    │              │    │             │
//! │ Identifiers │◄───┤ Records      │    │ Event       │
//! │ Enums       │    │ Graph        │    │ EventQueue  │
//! │ Config      │    │              │    │             │
//! └─────────────┘    └──────────────┘    └─────────────┘
//!        ▲                  ▲                   ▲
//!        │                  │                   │
//!        │           ┌──────────────┐           │
//!        └───────────┤  Simulation  ├───────────┘
//!                    │              │
//!                    │ Engine       │
//!                    │ WorldState   │
//!                    │ Selection    │
//!                    │ Statistics   │
//!                    └──────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod events;
pub mod neighborhood;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    ConfigError, ConfigValidationError, EventKind, NeighborhoodId, RepairLength, RunId,
    SimTime, SimulationConfig, TechnicianIndex,
};

// Events
pub use events::{Event, EventQueue};

// Neighborhoods
pub use neighborhood::{Neighborhood, NeighborhoodGraph, WeightedNeighborhoodGraph};

// Simulation types and functionality
pub use simulation::{
    nearest_neighborhood, LoggingConfig, RepairRandomness, RunCounters, RunReport,
    ScriptedRandomness, SimulationEngine, SimulationError, SimulationResult,
    StdRepairRandomness, WorldState,
};
