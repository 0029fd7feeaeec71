//! Run state and the simulation context
//!
//! Everything a run needs lives in [`GameState`]; the host owns one and
//! advances it with [`super::tick`]. There is no global state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Hazard;
use super::player::{Hitbox, Player, SwipeTracker};
use super::pool::SegmentPool;
use super::score::Score;
use super::spawn::SpawnPolicy;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// World scrolls, score accrues
    Running,
    /// Frozen until a press restarts
    GameOver,
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    HazardContact { hazard_id: u32 },
    Fell,
}

/// Commands and notifications for the host's collaborators
/// (physics, presentation), drained once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Segment moved; `gap` means its presence must be disabled
    SegmentRecycled { id: u32, x: f32, gap: bool },
    HazardSpawned { id: u32, pos: Vec2 },
    /// Scrolled off-screen
    HazardDespawned { id: u32 },
    /// Killed by the hitbox; play the burst effect at `pos`
    HazardDestroyed { id: u32, pos: Vec2 },
    Jumped { velocity_y: f32 },
    AttackStarted { hitbox: Hitbox },
    AttackEnded,
    /// Pause physics, tint the player, show the prompt
    GameOver { cause: GameOverCause, score: u64 },
    Restarted,
}

/// Complete run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: RunPhase,
    pub score: Score,
    /// Ticks advanced while running
    pub time_ticks: u64,
    /// Number of restarts since construction
    pub run_index: u32,
    pub pool: SegmentPool,
    /// Live hazards (not pooled)
    pub hazards: Vec<Hazard>,
    pub player: Player,
    pub spawn: SpawnPolicy,
    pub swipe: SwipeTracker,
    #[serde(skip)]
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Fresh run with the initial segment strip
    pub fn new(tuning: Tuning) -> Self {
        Self::with_first_id(tuning, 1)
    }

    /// Fresh run whose entity ids start at `first_id`
    fn with_first_id(tuning: Tuning, first_id: u32) -> Self {
        let pool = SegmentPool::new(&tuning, first_id);
        let next_id = first_id + pool.len() as u32;
        let player = Player::new(&tuning);
        log::info!(
            "New run: {} segments, rightmost x {:?}",
            pool.len(),
            pool.rightmost_x()
        );
        Self {
            tuning,
            phase: RunPhase::Running,
            score: Score::default(),
            time_ticks: 0,
            run_index: 0,
            pool,
            hazards: Vec::new(),
            player,
            spawn: SpawnPolicy::default(),
            swipe: SwipeTracker::default(),
            events: Vec::new(),
            next_id,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn hitbox(&self) -> Option<Hitbox> {
        self.player.hitbox(&self.tuning)
    }

    /// Spawn a hazard standing on the segment at `x`
    pub fn spawn_hazard(&mut self, x: f32) -> u32 {
        let id = self.next_entity_id();
        let pos = Vec2::new(x, self.tuning.floor_y - self.tuning.hazard_lift);
        self.hazards.push(Hazard::new(id, pos, self.tuning.scroll_speed));
        log::debug!("hazard {} spawned at {}", id, pos);
        self.push_event(GameEvent::HazardSpawned { id, pos });
        id
    }

    /// Remove a hazard by id, returning it if it was live
    pub fn remove_hazard(&mut self, id: u32) -> Option<Hazard> {
        let idx = self.hazards.iter().position(|h| h.id == id)?;
        Some(self.hazards.remove(idx))
    }

    /// Enter GameOver. Repeated triggers are no-ops; returns whether the
    /// transition happened.
    pub fn trigger_game_over(&mut self, cause: GameOverCause) -> bool {
        if self.phase == RunPhase::GameOver {
            return false;
        }
        self.phase = RunPhase::GameOver;
        let score = self.score.display();
        log::info!(
            "Game over ({:?}) after {} ticks, score {}",
            cause,
            self.time_ticks,
            score
        );
        self.push_event(GameEvent::GameOver { cause, score });
        true
    }

    /// Reset to a fresh run with the same tuning. Pending attack windows,
    /// hazards and flags are dropped with the old run. Entity ids keep
    /// counting so contacts against the old run match nothing.
    pub fn restart(&mut self) {
        let run_index = self.run_index + 1;
        let events = std::mem::take(&mut self.events);
        *self = Self::with_first_id(self.tuning.clone(), self.next_id);
        self.run_index = run_index;
        self.events = events;
        log::info!("Restarted (run {})", run_index);
        self.push_event(GameEvent::Restarted);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
