//! Simulation engine and supporting services
//!
//! This module contains the discrete-event engine, its world state, the
//! nearest-neighborhood policy, random outcome providers, run statistics,
//! logging setup and error handling.
//!
//! # Overview
//!
//! - **SimulationEngine**: Owns the event queue and world state of one run
//! - **WorldState**: Crew position, outstanding hotspots and per-technician counters
//! - **nearest_neighborhood**: Picks where the crew goes next
//! - **RepairRandomness**: Injectable source of repair and setup outcomes
//! - **RunReport**: Summary returned when a run drains its queue
//! - **SimulationError**: Error taxonomy for every engine operation
//!
//! # Usage Example
//!
//! ```rust
//! use hotspot_crew_simulator::neighborhood::*;
//! use hotspot_crew_simulator::simulation::*;
//! use hotspot_crew_simulator::types::*;
//!
//! let mut graph = WeightedNeighborhoodGraph::new();
//! let start = graph.add_neighborhood(Neighborhood::new("Chelsea", 3)).unwrap();
//! let next = graph.add_neighborhood(Neighborhood::new("Flatiron", 2)).unwrap();
//! graph.add_edge(start, next, 5.0).unwrap();
//!
//! let mut engine = SimulationEngine::new(&graph, SimulationConfig::default()).unwrap();
//! engine.initialize(start, 2).unwrap();
//! let report = engine.run().unwrap();
//!
//! assert_eq!(report.total_completed(), 5);
//! assert_eq!(report.visit_order, vec![start, next]);
//! ```

pub mod engine;
pub mod error;
pub mod logging;
pub mod randomness;
pub mod selection;
pub mod statistics;
pub mod world;

// Re-export all public types for convenience
pub use engine::*;
pub use error::*;
pub use logging::*;
pub use randomness::*;
pub use selection::*;
pub use statistics::*;
pub use world::*;
