//! Data-driven game balance
//!
//! Every gameplay number the simulation uses lives here. Hosts can load a
//! partial JSON document; missing fields fall back to the defaults in
//! [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Tick frequency used to convert millisecond durations to ticks
    pub tick_hz: u32,

    // === World ===
    pub segment_count: usize,
    pub segment_width: f32,
    pub floor_y: f32,
    pub scroll_speed: f32,
    pub recycle_x: f32,

    // === Spawning ===
    pub gap_chance: f32,
    pub hazard_chance: f32,
    pub hazard_warmup_x: f32,
    pub hazard_lift: f32,

    // === Player ===
    pub player_spawn: Vec2,
    pub jump_impulse: f32,
    pub attack_offset_x: f32,
    pub attack_duration_ms: u32,
    pub hitbox_size: f32,
    pub swipe_threshold: f32,
    pub fall_y: f32,

    // === Scoring ===
    pub score_per_tick: f64,
    pub hazard_bonus: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_hz: TICK_HZ,

            segment_count: SEGMENT_COUNT,
            segment_width: SEGMENT_WIDTH,
            floor_y: FLOOR_Y,
            scroll_speed: SCROLL_SPEED,
            recycle_x: RECYCLE_X,

            gap_chance: GAP_CHANCE,
            hazard_chance: HAZARD_CHANCE,
            hazard_warmup_x: HAZARD_WARMUP_X,
            hazard_lift: HAZARD_LIFT,

            player_spawn: Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1),
            jump_impulse: JUMP_IMPULSE,
            attack_offset_x: ATTACK_OFFSET_X,
            attack_duration_ms: ATTACK_DURATION_MS,
            hitbox_size: HITBOX_SIZE,
            swipe_threshold: SWIPE_THRESHOLD,
            fall_y: FALL_Y,

            score_per_tick: SCORE_PER_TICK,
            hazard_bonus: HAZARD_BONUS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (partial documents allowed)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp out-of-range values instead of rejecting them
    pub fn sanitized(mut self) -> Self {
        if self.tick_hz == 0 {
            log::warn!("tick_hz must be at least 1, using {}", TICK_HZ);
            self.tick_hz = TICK_HZ;
        }
        for (name, chance) in [
            ("gap_chance", &mut self.gap_chance),
            ("hazard_chance", &mut self.hazard_chance),
        ] {
            let value = *chance;
            if !(0.0..=1.0).contains(&value) {
                let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
                log::warn!("{} {} out of range, clamped to {}", name, value, clamped);
                *chance = clamped;
            }
        }
        if self.attack_duration_ms == 0 {
            log::warn!("attack_duration_ms is 0, the hitbox stays live for two ticks");
        }
        self
    }

    /// Attack window in whole ticks (rounded up, never zero)
    pub fn attack_duration_ticks(&self) -> u32 {
        let hz = self.tick_hz.max(1) as u64;
        let ticks = (self.attack_duration_ms as u64 * hz).div_ceil(1000);
        ticks.clamp(1, u32::MAX as u64) as u32
    }

    /// Initial rightmost segment x for a fresh strip
    pub fn initial_rightmost_x(&self) -> Option<f32> {
        match self.segment_count {
            0 => None,
            n => Some((n - 1) as f32 * self.segment_width),
        }
    }
}
