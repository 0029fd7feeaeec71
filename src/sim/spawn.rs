//! Spawn policy
//!
//! Decides what a recycled segment becomes: a gap, a solid segment, or a
//! solid segment with a hazard on top. Randomness is injected through
//! [`UniformSource`] so tests can force specific draws.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Source of uniform draws in [0, 1)
pub trait UniformSource {
    fn next_uniform(&mut self) -> f32;
}

/// Adapter from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng>(pub R);

impl RngSource<ThreadRng> {
    /// Unseeded thread-local generator (production)
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn next_uniform(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
/// An empty script always yields 0.5.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<f32>,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = f32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Draw that never passes any chance check below 1.0
    pub fn never() -> Self {
        Self::new([0.999])
    }
}

impl UniformSource for ScriptedSource {
    fn next_uniform(&mut self) -> f32 {
        match self.draws.pop_front() {
            Some(v) => {
                self.draws.push_back(v);
                v
            }
            None => 0.5,
        }
    }
}

/// Outcome of one recycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnDecision {
    /// Suppress the segment, leaving a hole
    Gap,
    /// Re-enable the segment, optionally with a hazard above it
    Solid { hazard: bool },
}

/// Gap/hazard policy state carried between recycles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// Previous recycle produced a gap (no two gaps in a row)
    pub last_was_gap: bool,
}

impl SpawnPolicy {
    /// Decide the fate of a segment being moved to `anchor_x + segment_width`.
    ///
    /// `anchor_x` is the rightmost segment x before the move. The hazard
    /// draw is only consumed once the anchor is past the warm-up distance.
    pub fn decide(
        &mut self,
        anchor_x: f32,
        rng: &mut dyn UniformSource,
        tuning: &Tuning,
    ) -> SpawnDecision {
        if !self.last_was_gap && rng.next_uniform() < tuning.gap_chance {
            self.last_was_gap = true;
            return SpawnDecision::Gap;
        }

        self.last_was_gap = false;
        let hazard =
            anchor_x > tuning.hazard_warmup_x && rng.next_uniform() < tuning.hazard_chance;
        SpawnDecision::Solid { hazard }
    }
}
