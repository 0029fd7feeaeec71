//! Runner simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! physics integration and input-device code:
//! - Advanced once per host frame by [`tick`]
//! - Positions and contacts come from the physics collaborator
//! - Randomness is injected through [`UniformSource`]
//! - Outbound commands leave as [`GameEvent`]s

pub mod entity;
pub mod player;
pub mod pool;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use entity::{Body, Hazard, Segment};
pub use player::{AttackState, Gesture, Hitbox, Player, SwipeTracker};
pub use pool::{Recycled, SegmentPool};
pub use score::Score;
pub use spawn::{RngSource, ScriptedSource, SpawnDecision, SpawnPolicy, UniformSource};
pub use state::{GameEvent, GameOverCause, GameState, RunPhase};
pub use tick::{Contacts, TickInput, tick};
