//! Neighborhoods and the distance graph between them
//!
//! # Overview
//!
//! - **Neighborhood**: Read-only record with an identity and a hotspot count
//! - **NeighborhoodGraph**: Lookup abstraction queried by the engine
//! - **WeightedNeighborhoodGraph**: Undirected petgraph-backed implementation
//!
//! # Usage Example
//!
//! ```rust
//! use hotspot_crew_simulator::neighborhood::*;
//!
//! let mut graph = WeightedNeighborhoodGraph::new();
//! let midtown = graph.add_neighborhood(Neighborhood::new("Midtown", 4)).unwrap();
//! let soho = graph.add_neighborhood(Neighborhood::new("SoHo", 2)).unwrap();
//! graph.add_edge(midtown, soho, 3.2).unwrap();
//!
//! assert_eq!(graph.edge_weight(soho, midtown), Some(3.2));
//! ```

pub mod graph;
pub mod neighborhood;

// Re-export all public types for convenience
pub use graph::{NeighborhoodGraph, WeightedNeighborhoodGraph};
pub use neighborhood::Neighborhood;
