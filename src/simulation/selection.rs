//! Next-neighborhood selection
//!
//! When the last busy technician finishes and nothing is left in the current
//! neighborhood, the crew moves to the closest neighborhood not yet visited.

use crate::neighborhood::NeighborhoodGraph;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::NeighborhoodId;

/// Pick the unvisited neighborhood closest to `current`
///
/// Candidates are scanned in order and only a strictly smaller distance
/// replaces the best so far, so the earliest candidate wins ties.
pub fn nearest_neighborhood<G: NeighborhoodGraph + ?Sized>(
    graph: &G,
    current: NeighborhoodId,
    candidates: &[NeighborhoodId],
) -> SimulationResult<(NeighborhoodId, f64)> {
    let mut best: Option<(NeighborhoodId, f64)> = None;

    for &candidate in candidates {
        let distance = graph
            .edge_weight(current, candidate)
            .ok_or(SimulationError::MissingEdge { from: current, to: candidate })?;

        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.ok_or(SimulationError::NoPath(current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::{Neighborhood, WeightedNeighborhoodGraph};

    fn star(weights: &[f64]) -> (WeightedNeighborhoodGraph, NeighborhoodId, Vec<NeighborhoodId>) {
        let mut graph = WeightedNeighborhoodGraph::new();
        let center = graph.add_neighborhood(Neighborhood::new("A", 1)).unwrap();
        let mut leaves = Vec::new();
        for (i, &weight) in weights.iter().enumerate() {
            let leaf = graph.add_neighborhood(Neighborhood::new(format!("N{}", i), 1)).unwrap();
            graph.add_edge(center, leaf, weight).unwrap();
            leaves.push(leaf);
        }
        (graph, center, leaves)
    }

    #[test]
    fn test_first_strictly_smaller_wins_ties() {
        let (graph, a, leaves) = star(&[5.0, 3.0, 3.0]);
        let (chosen, distance) = nearest_neighborhood(&graph, a, &leaves).unwrap();
        assert_eq!(chosen, leaves[1]);
        assert_eq!(distance, 3.0);
    }

    #[test]
    fn test_single_candidate() {
        let (graph, a, leaves) = star(&[250_000.0]);
        let (chosen, _) = nearest_neighborhood(&graph, a, &leaves).unwrap();
        assert_eq!(chosen, leaves[0]);
    }

    #[test]
    fn test_zero_distance_is_selectable() {
        let (graph, a, leaves) = star(&[4.0, 0.0]);
        let (chosen, distance) = nearest_neighborhood(&graph, a, &leaves).unwrap();
        assert_eq!(chosen, leaves[1]);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_empty_candidates_is_no_path() {
        let (graph, a, _) = star(&[1.0]);
        assert_eq!(nearest_neighborhood(&graph, a, &[]), Err(SimulationError::NoPath(a)));
    }

    #[test]
    fn test_missing_edge_propagates() {
        let (mut graph, a, mut leaves) = star(&[1.0]);
        let isolated = graph.add_neighborhood(Neighborhood::new("Isolated", 2)).unwrap();
        leaves.push(isolated);

        assert_eq!(
            nearest_neighborhood(&graph, a, &leaves),
            Err(SimulationError::MissingEdge { from: a, to: isolated })
        );
    }
}
