//! Random outcome providers
//!
//! The engine draws exactly two kinds of random outcomes: whether a repair is a
//! long one, and how many minutes a technician needs before starting the next
//! hotspot. Both go through [`RepairRandomness`] so that runs can be replayed
//! with scripted outcomes.

use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::types::SimTime;

/// Source of the random outcomes consumed by the engine
pub trait RepairRandomness: fmt::Debug {
    /// Biased coin: `true` with the given probability
    fn bernoulli(&mut self, probability: f64) -> bool;

    /// Uniform whole number of minutes in `min..=max`
    fn uniform_minutes(&mut self, min: SimTime, max: SimTime) -> SimTime;
}

impl<R: RepairRandomness + ?Sized> RepairRandomness for Box<R> {
    fn bernoulli(&mut self, probability: f64) -> bool {
        (**self).bernoulli(probability)
    }

    fn uniform_minutes(&mut self, min: SimTime, max: SimTime) -> SimTime {
        (**self).uniform_minutes(min, max)
    }
}

/// Randomness backed by a standard seeded generator
#[derive(Debug, Clone)]
pub struct StdRepairRandomness {
    rng: StdRng,
}

impl StdRepairRandomness {
    /// Create a generator from an optional seed; `None` seeds from entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                debug!("Using deterministic seed: {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Default for StdRepairRandomness {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RepairRandomness for StdRepairRandomness {
    fn bernoulli(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn uniform_minutes(&mut self, min: SimTime, max: SimTime) -> SimTime {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Replays queued outcomes in order
///
/// Once the coin queue is exhausted every repair is short; once the delay
/// queue is exhausted every delay is the range minimum.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandomness {
    long_repairs: VecDeque<bool>,
    setup_delays: VecDeque<SimTime>,
}

impl ScriptedRandomness {
    /// Create a script with no queued outcomes
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue coin outcomes, `true` meaning a long repair
    pub fn with_long_repairs(mut self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        self.long_repairs.extend(outcomes);
        self
    }

    /// Queue setup delays in minutes
    pub fn with_setup_delays(mut self, delays: impl IntoIterator<Item = SimTime>) -> Self {
        self.setup_delays.extend(delays);
        self
    }

    /// Outcomes not yet consumed, as `(coins, delays)`
    pub fn remaining(&self) -> (usize, usize) {
        (self.long_repairs.len(), self.setup_delays.len())
    }
}

impl RepairRandomness for ScriptedRandomness {
    fn bernoulli(&mut self, _probability: f64) -> bool {
        self.long_repairs.pop_front().unwrap_or(false)
    }

    fn uniform_minutes(&mut self, min: SimTime, max: SimTime) -> SimTime {
        // Scripted values are clamped so a script can never leave the configured range.
        self.setup_delays.pop_front().map_or(min, |delay| delay.clamp(min, max.max(min)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_minutes_within_range() {
        let mut randomness = StdRepairRandomness::new(Some(7));
        for _ in 0..1000 {
            let delay = randomness.uniform_minutes(10, 20);
            assert!((10..=20).contains(&delay));
        }
    }

    #[test]
    fn test_uniform_minutes_hits_both_bounds() {
        let mut randomness = StdRepairRandomness::new(Some(11));
        let samples: Vec<_> = (0..2000).map(|_| randomness.uniform_minutes(10, 20)).collect();
        assert!(samples.contains(&10));
        assert!(samples.contains(&20));
    }

    #[test]
    fn test_degenerate_range() {
        let mut randomness = StdRepairRandomness::new(Some(3));
        assert_eq!(randomness.uniform_minutes(15, 15), 15);
    }

    #[test]
    fn test_bernoulli_extremes() {
        let mut randomness = StdRepairRandomness::new(Some(5));
        assert!((0..100).all(|_| !randomness.bernoulli(0.0)));
        assert!((0..100).all(|_| randomness.bernoulli(1.0)));
    }

    #[test]
    fn test_bernoulli_rate_is_plausible() {
        let mut randomness = StdRepairRandomness::new(Some(42));
        let hits = (0..10_000).filter(|_| randomness.bernoulli(0.1)).count();
        assert!((700..1300).contains(&hits), "got {} long repairs out of 10000", hits);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = StdRepairRandomness::new(Some(99));
        let mut b = StdRepairRandomness::new(Some(99));
        for _ in 0..50 {
            assert_eq!(a.uniform_minutes(10, 20), b.uniform_minutes(10, 20));
            assert_eq!(a.bernoulli(0.1), b.bernoulli(0.1));
        }
    }

    #[test]
    fn test_scripted_replays_then_falls_back() {
        let mut script =
            ScriptedRandomness::new().with_long_repairs([true, false]).with_setup_delays([15, 30]);
        assert_eq!(script.remaining(), (2, 2));

        assert!(script.bernoulli(0.1));
        assert!(!script.bernoulli(0.1));
        assert!(!script.bernoulli(0.1));

        assert_eq!(script.uniform_minutes(10, 20), 15);
        assert_eq!(script.uniform_minutes(10, 20), 20);
        assert_eq!(script.uniform_minutes(10, 20), 10);
        assert_eq!(script.remaining(), (0, 0));
    }

    #[test]
    fn test_boxed_randomness() {
        let mut boxed: Box<dyn RepairRandomness> =
            Box::new(ScriptedRandomness::new().with_setup_delays([12]));
        assert_eq!(boxed.uniform_minutes(10, 20), 12);
    }
}
