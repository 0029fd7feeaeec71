//! World entities
//!
//! Segments and hazards share a [`Body`] capability record instead of a
//! common base type. Anything that treats them uniformly (the off-screen
//! scan) takes the body by reference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, velocity and presence shared by every scrolling entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Whether the entity currently has physical presence
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            active: true,
        }
    }

    /// True once the body has scrolled left of `threshold`
    #[inline]
    pub fn is_past(&self, threshold: f32) -> bool {
        self.pos.x < threshold
    }
}

/// A ground platform the player runs on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: u32,
    pub body: Body,
    /// Presence suppressed: the segment only marks a hole in the strip.
    /// Gaps keep scrolling so they still anchor the next recycle.
    pub gap: bool,
}

impl Segment {
    pub fn new(id: u32, x: f32, floor_y: f32, scroll_speed: f32) -> Self {
        Self {
            id,
            body: Body::new(Vec2::new(x, floor_y), Vec2::new(scroll_speed, 0.0)),
            gap: false,
        }
    }

    /// Player can stand on it
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.body.active && !self.gap
    }

    /// Suppress presence, keep position and scroll velocity
    pub fn make_gap(&mut self, x: f32) {
        self.body.pos.x = x;
        self.body.active = false;
        self.gap = true;
    }

    /// Re-enable at a new position
    pub fn make_solid(&mut self, x: f32, floor_y: f32, scroll_speed: f32) {
        self.body.pos = Vec2::new(x, floor_y);
        self.body.vel = Vec2::new(scroll_speed, 0.0);
        self.body.active = true;
        self.gap = false;
    }
}

/// A moving obstacle. Fatal on contact, destroyed by the attack hitbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub body: Body,
    /// Physics must not push it back on contact
    pub immovable: bool,
}

impl Hazard {
    pub fn new(id: u32, pos: Vec2, scroll_speed: f32) -> Self {
        Self {
            id,
            body: Body::new(pos, Vec2::new(scroll_speed, 0.0)),
            immovable: true,
        }
    }
}
