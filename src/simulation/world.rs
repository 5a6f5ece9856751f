//! Mutable world state of a single run
//!
//! The engine owns one [`WorldState`] per run and is the only writer. Read
//! access is exposed so callers can observe the run between steps.

use serde::{Deserialize, Serialize};

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{NeighborhoodId, SimTime, TechnicianIndex};

/// Crew position, outstanding work and per-technician counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    current_neighborhood: NeighborhoodId,
    remaining_to_visit: Vec<NeighborhoodId>,
    hotspots_remaining_in_current: u32,
    busy_technicians: usize,
    technician_count: usize,
    elapsed_time: SimTime,
    completed_by_technician: Vec<u32>,
    visit_order: Vec<NeighborhoodId>,
}

impl WorldState {
    /// Fresh state with the crew in `start`, every technician idle
    pub fn new(
        start: NeighborhoodId,
        start_hotspots: u32,
        remaining_to_visit: Vec<NeighborhoodId>,
        technician_count: usize,
    ) -> Self {
        Self {
            current_neighborhood: start,
            remaining_to_visit,
            hotspots_remaining_in_current: start_hotspots,
            busy_technicians: 0,
            technician_count,
            elapsed_time: 0,
            completed_by_technician: vec![0; technician_count],
            visit_order: vec![start],
        }
    }

    /// Neighborhood currently being serviced
    pub fn current_neighborhood(&self) -> NeighborhoodId {
        self.current_neighborhood
    }

    /// Neighborhoods not yet serviced, in scan order
    pub fn remaining_to_visit(&self) -> &[NeighborhoodId] {
        &self.remaining_to_visit
    }

    /// Hotspots in the current neighborhood not yet assigned
    pub fn hotspots_remaining_in_current(&self) -> u32 {
        self.hotspots_remaining_in_current
    }

    /// Technicians currently mid-repair
    pub fn busy_technicians(&self) -> usize {
        self.busy_technicians
    }

    /// Crew size
    pub fn technician_count(&self) -> usize {
        self.technician_count
    }

    /// Time of the most recently processed event
    pub fn elapsed_time(&self) -> SimTime {
        self.elapsed_time
    }

    /// Repairs undertaken per technician index
    pub fn completed_by_technician(&self) -> &[u32] {
        &self.completed_by_technician
    }

    /// Neighborhoods in the order the crew was sent to them, start first
    pub fn visit_order(&self) -> &[NeighborhoodId] {
        &self.visit_order
    }

    /// Whether an idle technician and an unassigned hotspot are both available
    pub fn can_assign(&self) -> bool {
        self.busy_technicians < self.technician_count && self.hotspots_remaining_in_current > 0
    }

    pub(crate) fn advance_clock(&mut self, time: SimTime) -> SimulationResult<()> {
        if time < self.elapsed_time {
            return Err(SimulationError::broken_invariant(format!(
                "event at minute {} processed after minute {}",
                time, self.elapsed_time
            )));
        }
        self.elapsed_time = time;
        Ok(())
    }

    /// Hand one hotspot of the current neighborhood to an idle technician
    pub(crate) fn assign_hotspot(&mut self) -> SimulationResult<()> {
        if !self.can_assign() {
            return Err(SimulationError::broken_invariant(format!(
                "cannot assign: {} of {} technicians busy, {} hotspots left",
                self.busy_technicians, self.technician_count, self.hotspots_remaining_in_current
            )));
        }
        self.busy_technicians += 1;
        self.hotspots_remaining_in_current -= 1;
        Ok(())
    }

    pub(crate) fn release_technician(&mut self) -> SimulationResult<()> {
        self.busy_technicians = self
            .busy_technicians
            .checked_sub(1)
            .ok_or_else(|| SimulationError::broken_invariant("technician finished while none were busy"))?;
        Ok(())
    }

    pub(crate) fn record_repair(&mut self, technician: TechnicianIndex) -> SimulationResult<()> {
        let count = self.completed_by_technician.get_mut(technician).ok_or_else(|| {
            SimulationError::broken_invariant(format!(
                "technician {} outside crew of {}",
                technician, self.technician_count
            ))
        })?;
        *count += 1;
        Ok(())
    }

    /// Send the crew to `destination`, loading its hotspots
    pub(crate) fn move_to(
        &mut self,
        destination: NeighborhoodId,
        hotspots: u32,
    ) -> SimulationResult<()> {
        let position = self
            .remaining_to_visit
            .iter()
            .position(|&id| id == destination)
            .ok_or_else(|| {
                SimulationError::broken_invariant(format!("{} is not left to visit", destination))
            })?;
        self.remaining_to_visit.remove(position);
        self.current_neighborhood = destination;
        self.hotspots_remaining_in_current = hotspots;
        self.visit_order.push(destination);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(technicians: usize, hotspots: u32) -> (WorldState, NeighborhoodId, NeighborhoodId) {
        let start = NeighborhoodId::new();
        let next = NeighborhoodId::new();
        (WorldState::new(start, hotspots, vec![next], technicians), start, next)
    }

    #[test]
    fn test_new_world_is_idle() {
        let (state, start, next) = world(3, 5);
        assert_eq!(state.current_neighborhood(), start);
        assert_eq!(state.remaining_to_visit(), &[next]);
        assert_eq!(state.busy_technicians(), 0);
        assert_eq!(state.completed_by_technician(), &[0, 0, 0]);
        assert_eq!(state.visit_order(), &[start]);
        assert!(state.can_assign());
    }

    #[test]
    fn test_assign_until_crew_busy() {
        let (mut state, _, _) = world(2, 5);
        state.assign_hotspot().unwrap();
        state.assign_hotspot().unwrap();
        assert!(!state.can_assign());
        assert!(matches!(state.assign_hotspot(), Err(SimulationError::BrokenInvariant(_))));
        assert_eq!(state.busy_technicians(), 2);
        assert_eq!(state.hotspots_remaining_in_current(), 3);
    }

    #[test]
    fn test_release_underflow_is_reported() {
        let (mut state, _, _) = world(1, 1);
        assert!(matches!(state.release_technician(), Err(SimulationError::BrokenInvariant(_))));
    }

    #[test]
    fn test_record_repair_checks_index() {
        let (mut state, _, _) = world(2, 1);
        state.record_repair(1).unwrap();
        assert_eq!(state.completed_by_technician(), &[0, 1]);
        assert!(state.record_repair(2).is_err());
    }

    #[test]
    fn test_clock_never_goes_back() {
        let (mut state, _, _) = world(1, 1);
        state.advance_clock(10).unwrap();
        state.advance_clock(10).unwrap();
        assert!(state.advance_clock(9).is_err());
        assert_eq!(state.elapsed_time(), 10);
    }

    #[test]
    fn test_move_to() {
        let (mut state, start, next) = world(1, 0);
        state.move_to(next, 4).unwrap();
        assert_eq!(state.current_neighborhood(), next);
        assert_eq!(state.hotspots_remaining_in_current(), 4);
        assert!(state.remaining_to_visit().is_empty());
        assert_eq!(state.visit_order(), &[start, next]);
        assert!(state.move_to(next, 4).is_err());
    }
}
