//! Weighted neighborhood graph
//!
//! This module contains the [`NeighborhoodGraph`] abstraction the engine queries
//! for neighborhoods and travel distances, plus a petgraph-backed implementation.
//! Which pairs of neighborhoods get an edge is decided by the caller.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::neighborhood::Neighborhood;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::NeighborhoodId;

/// Read-only view of the neighborhoods and the distances between them
pub trait NeighborhoodGraph {
    /// All neighborhoods, in a stable order
    fn neighborhoods(&self) -> Vec<&Neighborhood>;

    /// Look up a neighborhood by identifier
    fn neighborhood(&self, id: NeighborhoodId) -> Option<&Neighborhood>;

    /// Distance between two neighborhoods, if they are connected
    fn edge_weight(&self, from: NeighborhoodId, to: NeighborhoodId) -> Option<f64>;

    /// Whether the neighborhood is a vertex of this graph
    fn contains(&self, id: NeighborhoodId) -> bool {
        self.neighborhood(id).is_some()
    }

    /// Whether the two neighborhoods are connected
    fn has_edge(&self, from: NeighborhoodId, to: NeighborhoodId) -> bool {
        self.edge_weight(from, to).is_some()
    }
}

impl<G: NeighborhoodGraph + ?Sized> NeighborhoodGraph for &G {
    fn neighborhoods(&self) -> Vec<&Neighborhood> {
        (**self).neighborhoods()
    }

    fn neighborhood(&self, id: NeighborhoodId) -> Option<&Neighborhood> {
        (**self).neighborhood(id)
    }

    fn edge_weight(&self, from: NeighborhoodId, to: NeighborhoodId) -> Option<f64> {
        (**self).edge_weight(from, to)
    }
}

/// Undirected neighborhood graph with non-negative distance weights
#[derive(Debug, Clone, Default)]
pub struct WeightedNeighborhoodGraph {
    graph: UnGraph<Neighborhood, f64>,
    /// Quick lookup map from neighborhood ID to node index
    index: HashMap<NeighborhoodId, NodeIndex>,
}

impl WeightedNeighborhoodGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from neighborhoods and `(from, to, distance)` triples
    pub fn from_parts(
        neighborhoods: impl IntoIterator<Item = Neighborhood>,
        edges: impl IntoIterator<Item = (NeighborhoodId, NeighborhoodId, f64)>,
    ) -> SimulationResult<Self> {
        let mut graph = Self::new();
        for neighborhood in neighborhoods {
            graph.add_neighborhood(neighborhood)?;
        }
        for (from, to, distance) in edges {
            graph.add_edge(from, to, distance)?;
        }
        Ok(graph)
    }

    /// Add a neighborhood as a vertex
    pub fn add_neighborhood(&mut self, neighborhood: Neighborhood) -> SimulationResult<NeighborhoodId> {
        let id = neighborhood.id;
        if self.index.contains_key(&id) {
            return Err(SimulationError::invalid_input(format!(
                "neighborhood {} is already part of the graph",
                id
            )));
        }

        let node = self.graph.add_node(neighborhood);
        self.index.insert(id, node);
        Ok(id)
    }

    /// Connect two neighborhoods, replacing any existing distance between them
    pub fn add_edge(
        &mut self,
        from: NeighborhoodId,
        to: NeighborhoodId,
        distance: f64,
    ) -> SimulationResult<()> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(SimulationError::invalid_input(format!(
                "distance between {} and {} must be a non-negative finite number, got {}",
                from, to, distance
            )));
        }
        if from == to {
            return Err(SimulationError::invalid_input(format!(
                "self loop on neighborhood {} is not allowed",
                from
            )));
        }

        let a = self.node(from)?;
        let b = self.node(to)?;
        self.graph.update_edge(a, b, distance);
        Ok(())
    }

    /// Number of neighborhoods
    pub fn neighborhood_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of connections
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Total hotspots across every neighborhood
    pub fn total_hotspots(&self) -> u64 {
        self.graph.node_weights().map(|n| u64::from(n.hotspot_count)).sum()
    }

    fn node(&self, id: NeighborhoodId) -> SimulationResult<NodeIndex> {
        self.index.get(&id).copied().ok_or(SimulationError::UnknownNeighborhood(id))
    }
}

impl NeighborhoodGraph for WeightedNeighborhoodGraph {
    fn neighborhoods(&self) -> Vec<&Neighborhood> {
        self.graph.node_weights().collect()
    }

    fn neighborhood(&self, id: NeighborhoodId) -> Option<&Neighborhood> {
        self.index.get(&id).and_then(|&node| self.graph.node_weight(node))
    }

    fn edge_weight(&self, from: NeighborhoodId, to: NeighborhoodId) -> Option<f64> {
        let a = *self.index.get(&from)?;
        let b = *self.index.get(&to)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_neighborhoods() -> (WeightedNeighborhoodGraph, NeighborhoodId, NeighborhoodId) {
        let mut graph = WeightedNeighborhoodGraph::new();
        let a = graph.add_neighborhood(Neighborhood::new("A", 3)).unwrap();
        let b = graph.add_neighborhood(Neighborhood::new("B", 4)).unwrap();
        (graph, a, b)
    }

    #[test]
    fn test_edges_are_undirected() {
        let (mut graph, a, b) = two_neighborhoods();
        graph.add_edge(a, b, 7.5).unwrap();

        assert!(graph.has_edge(a, b));
        assert!(graph.has_edge(b, a));
        assert_eq!(graph.edge_weight(b, a), Some(7.5));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_re_adding_edge_updates_weight() {
        let (mut graph, a, b) = two_neighborhoods();
        graph.add_edge(a, b, 7.5).unwrap();
        graph.add_edge(b, a, 2.0).unwrap();

        assert_eq!(graph.edge_weight(a, b), Some(2.0));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_missing_edge_has_no_weight() {
        let (graph, a, b) = two_neighborhoods();
        assert!(!graph.has_edge(a, b));
        assert_eq!(graph.edge_weight(a, b), None);
        assert_eq!(graph.edge_weight(a, NeighborhoodId::new()), None);
    }

    #[test]
    fn test_invalid_edges_rejected() {
        let (mut graph, a, b) = two_neighborhoods();
        assert!(graph.add_edge(a, b, -1.0).is_err());
        assert!(graph.add_edge(a, b, f64::NAN).is_err());
        assert!(graph.add_edge(a, a, 1.0).is_err());
        assert!(matches!(
            graph.add_edge(a, NeighborhoodId::new(), 1.0),
            Err(SimulationError::UnknownNeighborhood(_))
        ));
    }

    #[test]
    fn test_duplicate_neighborhood_rejected() {
        let (mut graph, a, _) = two_neighborhoods();
        let duplicate = Neighborhood::with_id(a, "A again", 1);
        assert!(matches!(graph.add_neighborhood(duplicate), Err(SimulationError::InvalidInput(_))));
        assert_eq!(graph.neighborhood_count(), 2);
    }

    #[test]
    fn test_neighborhoods_keep_insertion_order() {
        let (graph, a, b) = two_neighborhoods();
        let ids: Vec<_> = graph.neighborhoods().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(graph.total_hotspots(), 7);
        assert!(graph.contains(a));
        assert!(!graph.contains(NeighborhoodId::new()));
    }

    #[test]
    fn test_from_parts() {
        let a = Neighborhood::new("A", 1);
        let b = Neighborhood::new("B", 2);
        let (a_id, b_id) = (a.id, b.id);
        let graph = WeightedNeighborhoodGraph::from_parts([a, b], [(a_id, b_id, 3.0)]).unwrap();
        assert_eq!(graph.neighborhood(b_id).map(|n| n.hotspot_count), Some(2));
        assert_eq!(graph.edge_weight(a_id, b_id), Some(3.0));
    }

    #[test]
    fn test_reference_implements_trait() {
        fn count<G: NeighborhoodGraph>(graph: G) -> usize {
            graph.neighborhoods().len()
        }
        let (graph, _, _) = two_neighborhoods();
        assert_eq!(count(&graph), 2);
    }
}
