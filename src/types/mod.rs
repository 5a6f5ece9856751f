//! Core types and identifiers for the crew simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: UUID-based neighborhood and run identifiers, time and index aliases
//! - **Enums**: Event kinds and repair length classes
//! - **Configuration**: Simulation timing configuration with validation and file support
//!
//! # Usage Example
//!
//! ```rust
//! use hotspot_crew_simulator::types::*;
//!
//! let neighborhood_id = NeighborhoodId::new();
//! assert!(neighborhood_id.to_string().starts_with("NBH_"));
//!
//! let config = SimulationConfig {
//!     long_repair_probability: 0.2,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
