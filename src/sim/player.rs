//! Player controller
//!
//! Jump and attack resolution. Grounded state comes from the physics
//! collaborator each tick; the attack window is a tick countdown owned by
//! the player, so it dies with the run on restart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::tuning::Tuning;

/// Attack window state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttackState {
    #[default]
    Ready,
    /// Hitbox live; deactivates on the first tick after `remaining` hits 0
    Active { remaining: u32 },
}

/// Transient overlap volume ahead of the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Hitbox {
    /// Axis-aligned overlap test against a point-sized or boxed target
    pub fn overlaps(&self, center: Vec2, half_extents: Vec2) -> bool {
        let d = (self.center - center).abs();
        let reach = self.half_extents + half_extents;
        d.x <= reach.x && d.y <= reach.y
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Resting on a segment, as last reported by physics
    pub grounded: bool,
    pub attack: AttackState,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            body: Body::new(tuning.player_spawn, Vec2::ZERO),
            grounded: false,
            attack: AttackState::Ready,
        }
    }

    #[inline]
    pub fn is_attacking(&self) -> bool {
        matches!(self.attack, AttackState::Active { .. })
    }

    /// Jump if grounded. Returns whether the impulse was applied.
    ///
    /// A successful jump clears `grounded` locally so a second request in
    /// the same tick (held key plus tap) is a no-op.
    pub fn request_jump(&mut self, tuning: &Tuning) -> bool {
        if !self.grounded {
            return false;
        }
        self.body.vel.y = tuning.jump_impulse;
        self.grounded = false;
        true
    }

    /// Start an attack unless one is in flight. Returns whether it started.
    pub fn request_attack(&mut self, tuning: &Tuning) -> bool {
        if self.is_attacking() {
            return false;
        }
        self.attack = AttackState::Active {
            remaining: tuning.attack_duration_ticks(),
        };
        true
    }

    /// Count the attack window down by one tick.
    /// Returns true when the window closed on this tick.
    pub fn advance_attack(&mut self) -> bool {
        match self.attack {
            AttackState::Ready => false,
            AttackState::Active { remaining: 0 } => {
                self.attack = AttackState::Ready;
                true
            }
            AttackState::Active { remaining } => {
                self.attack = AttackState::Active {
                    remaining: remaining - 1,
                };
                false
            }
        }
    }

    /// Live hitbox, positioned from the player's current position
    pub fn hitbox(&self, tuning: &Tuning) -> Option<Hitbox> {
        self.is_attacking().then(|| Hitbox {
            center: self.body.pos + Vec2::new(tuning.attack_offset_x, 0.0),
            half_extents: Vec2::splat(tuning.hitbox_size / 2.0),
        })
    }
}

/// What a completed pointer gesture asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    None,
    Slash,
}

/// Press/release drag recognition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwipeTracker {
    start: Option<Vec2>,
}

impl SwipeTracker {
    pub fn press(&mut self, pos: Vec2) {
        self.start = Some(pos);
    }

    /// A rightward drag longer than the threshold is a slash.
    /// Release without a recorded press is ignored.
    pub fn release(&mut self, pos: Vec2, tuning: &Tuning) -> Gesture {
        match self.start.take() {
            Some(start) if pos.x - start.x > tuning.swipe_threshold => Gesture::Slash,
            _ => Gesture::None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.start.is_some()
    }
}
