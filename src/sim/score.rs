//! Score accumulator

use serde::{Deserialize, Serialize};

/// Monotonic run score. Fractional per-tick accrual, displayed floored.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Score(f64);

impl Score {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Per-tick accrual
    pub fn add_tick(&mut self, per_tick: f64) {
        self.0 += per_tick.max(0.0);
    }

    /// Hazard-defeat bonus
    pub fn add_bonus(&mut self, bonus: f64) {
        self.0 += bonus.max(0.0);
    }

    /// Integer floor shown to the player
    pub fn display(&self) -> u64 {
        self.0.floor() as u64
    }

    /// HUD text
    pub fn label(&self) -> String {
        format!("SCORE: {}", self.display())
    }
}
