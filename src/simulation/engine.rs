//! Discrete-event simulation engine
//!
//! This module contains the [`SimulationEngine`], which owns the world state
//! and event queue of one run and applies one transition per dequeued event.
//!
//! # Transitions
//!
//! - `WorkStarted`: count the repair for the technician and schedule its end,
//!   short or long depending on a biased coin.
//! - `WorkFinished`: release the technician, then in priority order take the
//!   next hotspot in the same neighborhood, wait for colleagues, move the crew
//!   to the nearest unvisited neighborhood, or do nothing.
//! - `NeighborhoodChanged`: hand out hotspots of the new neighborhood to
//!   technician indices scanned from 0.

use chrono::Utc;
use tracing::{debug, info, instrument, trace};

use crate::events::{Event, EventQueue};
use crate::neighborhood::NeighborhoodGraph;
use crate::sim_event;
use crate::simulation::selection::nearest_neighborhood;
use crate::simulation::{
    RepairRandomness, RunCounters, RunReport, SimulationError, SimulationResult,
    StdRepairRandomness, WorldState,
};
use crate::types::{EventKind, NeighborhoodId, RepairLength, RunId, SimTime, SimulationConfig};

/// Event-driven simulation of a technician crew servicing hotspots
#[derive(Debug)]
pub struct SimulationEngine<G, R = StdRepairRandomness> {
    graph: G,
    config: SimulationConfig,
    randomness: R,
    world: Option<WorldState>,
    queue: EventQueue,
    counters: RunCounters,
    run_id: RunId,
}

impl<G: NeighborhoodGraph> SimulationEngine<G, StdRepairRandomness> {
    /// Create an engine drawing outcomes from a standard generator seeded by `config.seed`
    pub fn new(graph: G, config: SimulationConfig) -> SimulationResult<Self> {
        let randomness = StdRepairRandomness::new(config.seed);
        Self::with_randomness(graph, config, randomness)
    }
}

impl<G: NeighborhoodGraph, R: RepairRandomness> SimulationEngine<G, R> {
    /// Create an engine with an explicit source of random outcomes
    pub fn with_randomness(graph: G, config: SimulationConfig, randomness: R) -> SimulationResult<Self> {
        config.validate()?;
        Ok(Self {
            graph,
            config,
            randomness,
            world: None,
            queue: EventQueue::new(),
            counters: RunCounters::default(),
            run_id: RunId::new(),
        })
    }

    /// Reset the world with the crew in `start` and seed the first repairs at minute 0
    ///
    /// When `start` has no hotspots and other neighborhoods remain, nobody is
    /// assigned and a `NeighborhoodChanged` event is scheduled instead, moving
    /// the crew to the nearest unvisited neighborhood.
    #[instrument(skip(self))]
    pub fn initialize(&mut self, start: NeighborhoodId, technician_count: usize) -> SimulationResult<()> {
        if technician_count < 1 {
            return Err(SimulationError::invalid_input(format!(
                "technician count must be at least 1, got {}",
                technician_count
            )));
        }

        let start_hotspots = self
            .graph
            .neighborhood(start)
            .ok_or_else(|| {
                SimulationError::invalid_input(format!(
                    "start neighborhood {} is not part of the graph",
                    start
                ))
            })?
            .hotspot_count;

        let remaining: Vec<NeighborhoodId> = self
            .graph
            .neighborhoods()
            .iter()
            .map(|neighborhood| neighborhood.id)
            .filter(|&id| id != start)
            .collect();

        info!(
            "Initializing run with {} technicians, {} hotspots in start neighborhood, {} neighborhoods to visit",
            technician_count,
            start_hotspots,
            remaining.len()
        );

        self.queue.clear();
        self.counters = RunCounters::default();
        self.run_id = RunId::new();
        self.world = Some(WorldState::new(start, start_hotspots, remaining, technician_count));

        self.dispatch_crew(0)?;
        Ok(())
    }

    /// Process the earliest pending event
    ///
    /// Returns the processed event, or `None` once the queue has drained.
    pub fn step(&mut self) -> SimulationResult<Option<Event>> {
        if self.world.is_none() {
            return Err(not_initialized());
        }
        if self.queue.is_empty() {
            return Ok(None);
        }

        let event = self.queue.pop()?;
        self.world_mut()?.advance_clock(event.time())?;
        self.counters.events_processed += 1;
        trace!("Processing {}", event);

        match event.kind() {
            EventKind::WorkStarted => self.on_work_started(event)?,
            EventKind::WorkFinished => self.on_work_finished(event)?,
            EventKind::NeighborhoodChanged => self.on_neighborhood_changed(event)?,
        }

        Ok(Some(event))
    }

    /// Drain the queue and summarize the run
    #[instrument(skip(self), fields(run_id = %self.run_id))]
    pub fn run(&mut self) -> SimulationResult<RunReport> {
        if self.world.is_none() {
            return Err(not_initialized());
        }

        let started_at = Utc::now();
        while self.step()?.is_some() {}
        let finished_at = Utc::now();

        let world = self.world.as_ref().ok_or_else(not_initialized)?;
        let report = RunReport {
            run_id: self.run_id,
            started_at,
            finished_at,
            technician_count: world.technician_count(),
            duration_minutes: world.elapsed_time(),
            completed_by_technician: world.completed_by_technician().to_vec(),
            visit_order: world.visit_order().to_vec(),
            counters: self.counters,
        };

        info!(
            "Run finished after {} simulated minutes: {} repairs across {} neighborhoods",
            report.duration_minutes,
            report.total_completed(),
            report.neighborhoods_visited()
        );
        Ok(report)
    }

    /// Current world state, once initialized
    pub fn world(&self) -> Option<&WorldState> {
        self.world.as_ref()
    }

    /// Number of events still pending
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Whether the run has drained its queue
    pub fn is_finished(&self) -> bool {
        self.world.is_some() && self.queue.is_empty()
    }

    /// Counters of the current run
    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    /// Identifier of the current run
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Active configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Neighborhood graph the engine queries
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Source of random outcomes
    pub fn randomness(&self) -> &R {
        &self.randomness
    }

    fn world_mut(&mut self) -> SimulationResult<&mut WorldState> {
        self.world.as_mut().ok_or_else(not_initialized)
    }

    fn on_work_started(&mut self, event: Event) -> SimulationResult<()> {
        let technician = technician_of(&event)?;
        self.world_mut()?.record_repair(technician)?;

        let length = if self.randomness.bernoulli(self.config.long_repair_probability) {
            self.counters.long_repairs += 1;
            RepairLength::Long
        } else {
            RepairLength::Short
        };
        let duration = match length {
            RepairLength::Short => self.config.short_repair_minutes,
            RepairLength::Long => self.config.long_repair_minutes,
        };

        let finish = later(event.time(), duration)?;
        debug!(technician, %length, "Repair started at minute {}, lasts {} minutes", event.time(), duration);
        self.queue.push(Event::work_finished(finish, technician));
        Ok(())
    }

    fn on_work_finished(&mut self, event: Event) -> SimulationResult<()> {
        let technician = technician_of(&event)?;
        let time = event.time();
        let world = self.world.as_mut().ok_or_else(not_initialized)?;
        if technician >= world.technician_count() {
            return Err(SimulationError::broken_invariant(format!(
                "technician {} outside crew of {}",
                technician,
                world.technician_count()
            )));
        }
        world.release_technician()?;

        if world.hotspots_remaining_in_current() > 0 {
            let (min, max) = self.config.setup_range();
            let delay = self.randomness.uniform_minutes(min, max);
            let start = later(time, delay)?;
            world.assign_hotspot()?;
            debug!(technician, "Next hotspot in the same neighborhood after {} minutes", delay);
            self.queue.push(Event::work_started(start, technician));
        } else if world.busy_technicians() > 0 {
            trace!(technician, busy = world.busy_technicians(), "Waiting for colleagues");
        } else if !world.remaining_to_visit().is_empty() {
            self.depart(time)?;
        } else {
            debug!("Every neighborhood serviced, crew idle at minute {}", time);
        }
        Ok(())
    }

    fn on_neighborhood_changed(&mut self, event: Event) -> SimulationResult<()> {
        let assigned = self.dispatch_crew(event.time())?;
        debug!("Crew arrived at minute {}, {} technicians assigned", event.time(), assigned);
        Ok(())
    }

    /// Assign hotspots to technician indices 0, 1, 2, ... while both remain
    ///
    /// A neighborhood without hotspots leaves the crew idle; it then moves on
    /// straight away so the remaining neighborhoods still get serviced.
    fn dispatch_crew(&mut self, time: SimTime) -> SimulationResult<usize> {
        let world = self.world.as_mut().ok_or_else(not_initialized)?;

        let mut assigned = 0;
        while world.can_assign() {
            world.assign_hotspot()?;
            self.queue.push(Event::work_started(time, assigned));
            assigned += 1;
        }

        if world.busy_technicians() == 0 && !world.remaining_to_visit().is_empty() {
            self.depart(time)?;
        }
        Ok(assigned)
    }

    /// Send the idle crew to the nearest unvisited neighborhood
    fn depart(&mut self, time: SimTime) -> SimulationResult<()> {
        let world = self.world.as_mut().ok_or_else(not_initialized)?;
        let from = world.current_neighborhood();

        let (destination, distance) =
            nearest_neighborhood(&self.graph, from, world.remaining_to_visit())?;
        let hotspots = self
            .graph
            .neighborhood(destination)
            .ok_or(SimulationError::UnknownNeighborhood(destination))?
            .hotspot_count;
        let travel = self.config.travel_minutes(distance);
        let arrival = later(time, travel)?;
        let total_travel = later(self.counters.travel_minutes, travel)?;

        world.move_to(destination, hotspots)?;
        self.counters.travel_minutes = total_travel;

        sim_event!(
            info,
            "Crew moving to next neighborhood",
            from = tracing::field::display(from),
            to = tracing::field::display(destination),
            travel_minutes = travel,
            hotspots = hotspots,
            remaining = world.remaining_to_visit().len(),
        );
        self.queue.push(Event::neighborhood_changed(arrival));
        Ok(())
    }
}

fn technician_of(event: &Event) -> SimulationResult<usize> {
    if !event.kind().is_technician_specific() {
        return Err(SimulationError::broken_invariant(format!(
            "{} event does not concern a technician",
            event.kind()
        )));
    }
    event.technician().ok_or_else(|| {
        SimulationError::broken_invariant(format!("{} event without a technician", event.kind()))
    })
}

/// Minute `delay` minutes after `time`, or an error when the clock would overflow
fn later(time: SimTime, delay: SimTime) -> SimulationResult<SimTime> {
    time.checked_add(delay).ok_or(SimulationError::ClockOverflow { time, delay })
}

fn not_initialized() -> SimulationError {
    SimulationError::invalid_input("engine must be initialized before running")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::{Neighborhood, WeightedNeighborhoodGraph};
    use crate::simulation::ScriptedRandomness;

    fn single(hotspots: u32) -> (WeightedNeighborhoodGraph, NeighborhoodId) {
        let mut graph = WeightedNeighborhoodGraph::new();
        let id = graph.add_neighborhood(Neighborhood::new("Start", hotspots)).unwrap();
        (graph, id)
    }

    fn scripted(
        graph: WeightedNeighborhoodGraph,
        script: ScriptedRandomness,
    ) -> SimulationEngine<WeightedNeighborhoodGraph, ScriptedRandomness> {
        SimulationEngine::with_randomness(graph, SimulationConfig::default(), script).unwrap()
    }

    #[test]
    fn test_initialize_seeds_one_event_per_assignable_technician() {
        let (graph, start) = single(2);
        let mut engine = scripted(graph, ScriptedRandomness::new());
        engine.initialize(start, 5).unwrap();

        let world = engine.world().unwrap();
        assert_eq!(world.busy_technicians(), 2);
        assert_eq!(world.hotspots_remaining_in_current(), 0);
        assert_eq!(engine.pending_events(), 2);
    }

    #[test]
    fn test_initialize_limited_by_crew_size() {
        let (graph, start) = single(10);
        let mut engine = scripted(graph, ScriptedRandomness::new());
        engine.initialize(start, 3).unwrap();

        let world = engine.world().unwrap();
        assert_eq!(world.busy_technicians(), 3);
        assert_eq!(world.hotspots_remaining_in_current(), 7);
    }

    #[test]
    fn test_initialize_rejects_bad_input() {
        let (graph, start) = single(1);
        let mut engine = scripted(graph, ScriptedRandomness::new());
        assert!(matches!(engine.initialize(start, 0), Err(SimulationError::InvalidInput(_))));
        assert!(matches!(
            engine.initialize(NeighborhoodId::new(), 1),
            Err(SimulationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_run_before_initialize_fails() {
        let (graph, _) = single(1);
        let mut engine = scripted(graph, ScriptedRandomness::new());
        assert!(matches!(engine.run(), Err(SimulationError::InvalidInput(_))));
        assert!(matches!(engine.step(), Err(SimulationError::InvalidInput(_))));
        assert!(!engine.is_finished());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let (graph, _) = single(1);
        let config = SimulationConfig { travel_speed: 0.0, ..Default::default() };
        assert!(matches!(
            SimulationEngine::new(graph, config),
            Err(SimulationError::Configuration(_))
        ));
    }

    #[test]
    fn test_work_started_counts_at_start() {
        let (graph, start) = single(1);
        let mut engine = scripted(graph, ScriptedRandomness::new());
        engine.initialize(start, 1).unwrap();

        let event = engine.step().unwrap().unwrap();
        assert_eq!(event.kind(), EventKind::WorkStarted);
        assert_eq!(engine.world().unwrap().completed_by_technician(), &[1]);
        assert_eq!(engine.world().unwrap().busy_technicians(), 1);
    }

    #[test]
    fn test_long_repair_takes_long_duration() {
        let (graph, start) = single(1);
        let mut engine = scripted(graph, ScriptedRandomness::new().with_long_repairs([true]));
        engine.initialize(start, 1).unwrap();

        let report = engine.run().unwrap();
        assert_eq!(report.duration_minutes, 25);
        assert_eq!(report.counters.long_repairs, 1);
        assert_eq!(report.counters.events_processed, 2);
    }

    #[test]
    fn test_empty_start_with_nothing_else_finishes_immediately() {
        let (graph, start) = single(0);
        let mut engine = scripted(graph, ScriptedRandomness::new());
        engine.initialize(start, 2).unwrap();
        assert!(engine.is_finished());

        let report = engine.run().unwrap();
        assert_eq!(report.duration_minutes, 0);
        assert_eq!(report.completed_by_technician, vec![0, 0]);
    }

    #[test]
    fn test_technician_of_rejects_crew_events() {
        assert_eq!(technician_of(&Event::work_finished(4, 2)), Ok(2));
        assert!(matches!(
            technician_of(&Event::neighborhood_changed(4)),
            Err(SimulationError::BrokenInvariant(_))
        ));
    }

    #[test]
    fn test_later_reports_overflow() {
        assert_eq!(later(10, 15), Ok(25));
        assert_eq!(
            later(SimTime::MAX, 1),
            Err(SimulationError::ClockOverflow { time: SimTime::MAX, delay: 1 })
        );
    }

    #[test]
    fn test_long_repair_past_end_of_clock_fails() {
        let (graph, start) = single(2);
        let config = SimulationConfig { long_repair_minutes: SimTime::MAX, ..Default::default() };
        let script = ScriptedRandomness::new().with_long_repairs([true]);
        let mut engine = SimulationEngine::with_randomness(graph, config, script).unwrap();
        engine.initialize(start, 1).unwrap();

        assert_eq!(
            engine.run(),
            Err(SimulationError::ClockOverflow { time: SimTime::MAX, delay: 10 })
        );
        assert_eq!(engine.world().unwrap().elapsed_time(), SimTime::MAX);
    }

    #[test]
    fn test_initialize_resets_previous_run() {
        let (graph, start) = single(2);
        let mut engine = scripted(graph, ScriptedRandomness::new());
        engine.initialize(start, 1).unwrap();
        let first = engine.run().unwrap();

        engine.initialize(start, 2).unwrap();
        assert_eq!(engine.world().unwrap().completed_by_technician(), &[0, 0]);
        assert_eq!(engine.counters(), RunCounters::default());
        let second = engine.run().unwrap();

        assert_ne!(first.run_id, second.run_id);
        assert_eq!(second.completed_by_technician, vec![1, 1]);
    }
}
