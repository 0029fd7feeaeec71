//! Cyber Raid - A side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (world recycling, spawning, player, run state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, physics integration and input capture live in the host. The
//! simulation only consumes contact reports and input snapshots and emits
//! [`sim::GameEvent`]s back.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Simulation tick rate the per-tick constants were tuned against
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;

    /// Ground segments created at world init (also the pool capacity)
    pub const SEGMENT_COUNT: usize = 30;
    /// Horizontal spacing between segment centers
    pub const SEGMENT_WIDTH: f32 = 32.0;
    /// Segment center height (y-down)
    pub const FLOOR_Y: f32 = 584.0;
    /// Scroll velocity shared by segments and hazards (negative = leftward)
    pub const SCROLL_SPEED: f32 = -250.0;
    /// Entities left of this x are recycled (segments) or destroyed (hazards)
    pub const RECYCLE_X: f32 = -50.0;

    /// Chance a recycle produces a gap (when the previous one didn't)
    pub const GAP_CHANCE: f32 = 0.15;
    /// Chance a solid recycle also spawns a hazard
    pub const HAZARD_CHANCE: f32 = 0.1;
    /// Hazards only spawn once the strip's rightmost edge is past this x
    pub const HAZARD_WARMUP_X: f32 = 800.0;
    /// Hazard height above the floor
    pub const HAZARD_LIFT: f32 = 48.0;

    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -500.0;
    /// Hitbox offset ahead of the player
    pub const ATTACK_OFFSET_X: f32 = 30.0;
    /// Attack window
    pub const ATTACK_DURATION_MS: u32 = 100;
    /// Hitbox edge length
    pub const HITBOX_SIZE: f32 = 48.0;
    /// Minimum rightward drag (press to release) that counts as a slash
    pub const SWIPE_THRESHOLD: f32 = 30.0;
    /// Player y past this is a fall
    pub const FALL_Y: f32 = 650.0;
    /// Player spawn position
    pub const PLAYER_SPAWN: (f32, f32) = (100.0, 450.0);

    /// Score added every running tick
    pub const SCORE_PER_TICK: f64 = 0.1;
    /// Score for destroying a hazard
    pub const HAZARD_BONUS: f64 = 100.0;

    /// Prompt shown by the presentation layer after a game over
    pub const GAME_OVER_PROMPT: &str = "GAME OVER\nClick to Restart";
}
