//! Neighborhood records
//!
//! This module contains the read-only neighborhood record supplied to the
//! simulation: an identity, a display name and the number of hotspots to service.

use crate::types::NeighborhoodId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A neighborhood whose hotspots the crew must service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    /// Unique identifier for the neighborhood
    pub id: NeighborhoodId,
    /// Human-readable name of the neighborhood
    pub name: String,
    /// Number of hotspots to service in this neighborhood
    pub hotspot_count: u32,
}

impl Neighborhood {
    /// Create a new neighborhood with a fresh identifier
    pub fn new(name: impl Into<String>, hotspot_count: u32) -> Self {
        Self { id: NeighborhoodId::new(), name: name.into(), hotspot_count }
    }

    /// Create a neighborhood with a known identifier
    pub fn with_id(id: NeighborhoodId, name: impl Into<String>, hotspot_count: u32) -> Self {
        Self { id, name: name.into(), hotspot_count }
    }

    /// Whether the crew has nothing to do here
    pub fn has_no_hotspots(&self) -> bool {
        self.hotspot_count == 0
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} hotspots)", self.name, self.hotspot_count)
    }
}
