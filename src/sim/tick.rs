//! Per-tick simulation step
//!
//! Recycling and spawning run before collision resolution. Physics is not
//! re-run after recycling: contacts are whatever the physics collaborator
//! reported for this tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::Gesture;
use super::spawn::{SpawnDecision, UniformSource};
use super::state::{GameEvent, GameOverCause, GameState, RunPhase};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Jump key held (polled)
    pub jump_held: bool,
    /// Attack key went down this tick (edge)
    pub attack_pressed: bool,
    /// Pointer pressed this tick at this position
    pub press: Option<Vec2>,
    /// Pointer released this tick at this position
    pub release: Option<Vec2>,
}

/// Contact report from the physics collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contacts {
    /// Player resting on a segment
    pub player_grounded: bool,
    /// Hazards overlapping the player
    pub player_hazards: Vec<u32>,
    /// Hazards overlapping the attack hitbox
    pub hitbox_hazards: Vec<u32>,
}

/// Advance the run by one tick
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    contacts: &Contacts,
    rng: &mut dyn UniformSource,
) {
    if state.phase == RunPhase::GameOver {
        // Only a press does anything: it starts a new run
        if input.press.is_some() {
            state.restart();
        }
        return;
    }

    state.time_ticks += 1;
    state.score.add_tick(state.tuning.score_per_tick);

    recycle_world(state, rng);

    if state.player.advance_attack() {
        log::debug!("attack window closed");
        state.push_event(GameEvent::AttackEnded);
    }

    state.player.grounded = contacts.player_grounded;
    resolve_input(state, input);

    resolve_collisions(state, contacts);
}

/// Recycle off-screen segments, spawn hazards, drop off-screen hazards
fn recycle_world(state: &mut GameState, rng: &mut dyn UniformSource) {
    let recycled = state
        .pool
        .recycle_offscreen(&mut state.spawn, rng, &state.tuning);

    for r in recycled {
        let gap = r.decision == SpawnDecision::Gap;
        state.push_event(GameEvent::SegmentRecycled {
            id: r.segment_id,
            x: r.x,
            gap,
        });
        if matches!(r.decision, SpawnDecision::Solid { hazard: true }) {
            state.spawn_hazard(r.x);
        }
    }

    let threshold = state.tuning.recycle_x;
    let gone: Vec<u32> = state
        .hazards
        .iter()
        .filter(|h| h.body.is_past(threshold))
        .map(|h| h.id)
        .collect();
    for id in gone {
        state.remove_hazard(id);
        state.push_event(GameEvent::HazardDespawned { id });
    }
}

fn resolve_input(state: &mut GameState, input: &TickInput) {
    if input.jump_held {
        try_jump(state);
    }
    if input.attack_pressed {
        try_attack(state);
    }
    if let Some(pos) = input.press {
        state.swipe.press(pos);
        try_jump(state);
    }
    if let Some(pos) = input.release {
        if state.swipe.release(pos, &state.tuning) == Gesture::Slash {
            try_attack(state);
        }
    }
}

fn try_jump(state: &mut GameState) {
    if state.player.request_jump(&state.tuning) {
        let velocity_y = state.player.body.vel.y;
        state.push_event(GameEvent::Jumped { velocity_y });
    }
}

fn try_attack(state: &mut GameState) {
    if !state.player.request_attack(&state.tuning) {
        return;
    }
    if let Some(hitbox) = state.hitbox() {
        log::debug!("attack at {}", hitbox.center);
        state.push_event(GameEvent::AttackStarted { hitbox });
    }
}

/// Hitbox kills first; anything still touching the player ends the run
fn resolve_collisions(state: &mut GameState, contacts: &Contacts) {
    if state.player.is_attacking() {
        for &id in &contacts.hitbox_hazards {
            if let Some(hazard) = state.remove_hazard(id) {
                state.score.add_bonus(state.tuning.hazard_bonus);
                state.push_event(GameEvent::HazardDestroyed {
                    id,
                    pos: hazard.body.pos,
                });
            }
        }
    }

    let hit = contacts
        .player_hazards
        .iter()
        .copied()
        .find(|id| state.hazards.iter().any(|h| h.id == *id));
    if let Some(hazard_id) = hit {
        state.trigger_game_over(GameOverCause::HazardContact { hazard_id });
        return;
    }

    if state.player.body.pos.y > state.tuning.fall_y {
        state.trigger_game_over(GameOverCause::Fell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::ScriptedSource;
    use crate::tuning::Tuning;

    fn grounded() -> Contacts {
        Contacts {
            player_grounded: true,
            ..Default::default()
        }
    }

    fn step(state: &mut GameState, input: &TickInput, contacts: &Contacts) {
        tick(state, input, contacts, &mut ScriptedSource::never());
    }

    #[test]
    fn test_score_accrues_while_running() {
        let mut state = GameState::default();
        for _ in 0..100 {
            step(&mut state, &TickInput::default(), &grounded());
        }
        assert_eq!(state.time_ticks, 100);
        assert!((state.score.value() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_recycle_scenario() {
        let mut state = GameState::default();
        state.drain_events();
        state.pool.segments_mut()[0].body.pos.x = -51.0;

        step(&mut state, &TickInput::default(), &grounded());

        assert_eq!(state.pool.segments()[0].body.pos.x, 960.0);
        let id = state.pool.segments()[0].id;
        assert!(state.drain_events().contains(&GameEvent::SegmentRecycled {
            id,
            x: 960.0,
            gap: false
        }));
    }

    #[test]
    fn test_hazard_spawn_past_warmup() {
        let mut state = GameState::default();
        state.pool.segments_mut()[0].body.pos.x = -51.0;

        // No gap, then hazard
        let mut rng = ScriptedSource::new([0.9, 0.05]);
        tick(&mut state, &TickInput::default(), &grounded(), &mut rng);

        assert_eq!(state.hazards.len(), 1);
        assert_eq!(state.hazards[0].body.pos, Vec2::new(960.0, 536.0));
    }

    #[test]
    fn test_offscreen_hazard_despawns() {
        let mut state = GameState::default();
        let id = state.spawn_hazard(500.0);
        state.hazards[0].body.pos.x = -60.0;
        state.drain_events();

        step(&mut state, &TickInput::default(), &grounded());
        assert!(state.hazards.is_empty());
        assert!(state.drain_events().contains(&GameEvent::HazardDespawned { id }));
        assert_eq!(state.phase, RunPhase::Running);
    }

    #[test]
    fn test_jump_then_airborne_request() {
        let mut state = GameState::default();
        let jump = TickInput {
            jump_held: true,
            ..Default::default()
        };

        step(&mut state, &jump, &grounded());
        assert_eq!(state.player.body.vel.y, -500.0);

        // Physics moved us up and reports no contact
        state.player.body.vel.y = -450.0;
        step(&mut state, &jump, &Contacts::default());
        assert_eq!(state.player.body.vel.y, -450.0);
    }

    #[test]
    fn test_held_key_and_tap_jump_once() {
        let mut state = GameState::default();
        state.drain_events();
        let input = TickInput {
            jump_held: true,
            press: Some(Vec2::new(400.0, 300.0)),
            ..Default::default()
        };

        step(&mut state, &input, &grounded());
        let jumps = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Jumped { .. }))
            .count();
        assert_eq!(jumps, 1);
    }

    #[test]
    fn test_attack_window_in_ticks() {
        let mut state = GameState::default();
        let duration = state.tuning.attack_duration_ticks();
        let attack = TickInput {
            attack_pressed: true,
            ..Default::default()
        };

        // Tick T
        step(&mut state, &attack, &grounded());
        assert!(state.hitbox().is_some());

        // T+1 ..= T+duration: still active, repeated presses ignored
        for t in 1..=duration {
            step(&mut state, &attack, &grounded());
            assert!(state.hitbox().is_some(), "inactive at T+{}", t);
        }
        assert_eq!(
            state.player.attack,
            crate::sim::AttackState::Active { remaining: 0 }
        );

        // T+duration+1: old window closes, a new one opens the same tick
        state.drain_events();
        step(&mut state, &attack, &grounded());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::AttackEnded));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::AttackStarted { .. }))
        );
        assert_eq!(
            state.player.attack,
            crate::sim::AttackState::Active { remaining: duration }
        );
    }

    #[test]
    fn test_second_attack_keeps_remaining() {
        let mut state = GameState::default();
        let attack = TickInput {
            attack_pressed: true,
            ..Default::default()
        };
        step(&mut state, &attack, &grounded());
        step(&mut state, &TickInput::default(), &grounded());
        let before = state.player.attack;
        state.player.request_attack(&Tuning::default());
        assert_eq!(state.player.attack, before);
    }

    #[test]
    fn test_swipe_triggers_attack() {
        let mut state = GameState::default();
        step(
            &mut state,
            &TickInput {
                press: Some(Vec2::new(100.0, 300.0)),
                ..Default::default()
            },
            &grounded(),
        );
        assert!(!state.player.is_attacking());

        step(
            &mut state,
            &TickInput {
                release: Some(Vec2::new(160.0, 310.0)),
                ..Default::default()
            },
            &Contacts::default(),
        );
        assert!(state.player.is_attacking());
    }

    #[test]
    fn test_hitbox_kills_hazard() {
        let mut state = GameState::default();
        let id = state.spawn_hazard(140.0);
        state.player.request_attack(&Tuning::default());
        let before = state.score.value();
        state.drain_events();

        let contacts = Contacts {
            player_grounded: true,
            hitbox_hazards: vec![id],
            ..Default::default()
        };
        step(&mut state, &TickInput::default(), &contacts);

        assert!(state.hazards.is_empty());
        assert_eq!(state.phase, RunPhase::Running);
        let gained = state.score.value() - before;
        assert!((gained - (100.0 + 0.1)).abs() < 1e-9);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::HazardDestroyed { id: hid, .. } if *hid == id))
        );
    }

    #[test]
    fn test_hitbox_report_ignored_without_attack() {
        let mut state = GameState::default();
        let id = state.spawn_hazard(140.0);
        let contacts = Contacts {
            hitbox_hazards: vec![id],
            ..Default::default()
        };
        step(&mut state, &TickInput::default(), &contacts);
        assert_eq!(state.hazards.len(), 1);
    }

    #[test]
    fn test_hitbox_wins_same_tick_contact() {
        let mut state = GameState::default();
        let id = state.spawn_hazard(120.0);
        state.player.request_attack(&Tuning::default());
        let contacts = Contacts {
            player_grounded: true,
            player_hazards: vec![id],
            hitbox_hazards: vec![id],
        };
        step(&mut state, &TickInput::default(), &contacts);
        assert_eq!(state.phase, RunPhase::Running);
    }

    #[test]
    fn test_hazard_contact_ends_run_and_freezes_score() {
        let mut state = GameState::default();
        let id = state.spawn_hazard(110.0);
        for _ in 0..10 {
            step(&mut state, &TickInput::default(), &grounded());
        }
        let contacts = Contacts {
            player_grounded: true,
            player_hazards: vec![id],
            ..Default::default()
        };
        step(&mut state, &TickInput::default(), &contacts);
        assert_eq!(state.phase, RunPhase::GameOver);

        let frozen = state.score;
        let ticks = state.time_ticks;
        state.pool.segments_mut()[0].body.pos.x = -100.0;
        for _ in 0..50 {
            let input = TickInput {
                jump_held: true,
                attack_pressed: true,
                release: Some(Vec2::new(900.0, 0.0)),
                ..Default::default()
            };
            step(&mut state, &input, &contacts);
        }
        assert_eq!(state.score, frozen);
        assert_eq!(state.time_ticks, ticks);
        assert!(!state.player.is_attacking());
        // Nothing recycled while frozen
        assert_eq!(state.pool.segments()[0].body.pos.x, -100.0);
    }

    #[test]
    fn test_unknown_hazard_contact_ignored() {
        let mut state = GameState::default();
        let contacts = Contacts {
            player_grounded: true,
            player_hazards: vec![9999],
            ..Default::default()
        };
        step(&mut state, &TickInput::default(), &contacts);
        assert_eq!(state.phase, RunPhase::Running);
    }

    #[test]
    fn test_fall_ends_run() {
        let mut state = GameState::default();
        state.player.body.pos.y = 650.0;
        step(&mut state, &TickInput::default(), &Contacts::default());
        assert_eq!(state.phase, RunPhase::Running);

        state.player.body.pos.y = 651.0;
        state.drain_events();
        step(&mut state, &TickInput::default(), &Contacts::default());
        assert_eq!(state.phase, RunPhase::GameOver);

        // Still below the floor next tick: no second transition
        step(&mut state, &TickInput::default(), &Contacts::default());
        let overs = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_press_restarts_after_game_over() {
        let mut state = GameState::default();
        let mut rng = ScriptedSource::new([0.9, 0.0]);
        state.pool.segments_mut()[0].body.pos.x = -51.0;
        tick(&mut state, &TickInput::default(), &grounded(), &mut rng);
        assert_eq!(state.hazards.len(), 1);

        state.player.request_attack(&Tuning::default());
        state.trigger_game_over(GameOverCause::Fell);

        let press = TickInput {
            press: Some(Vec2::new(400.0, 300.0)),
            ..Default::default()
        };
        step(&mut state, &press, &grounded());

        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score.value(), 0.0);
        assert!(state.hazards.is_empty());
        assert!(!state.player.is_attacking());
        assert!(!state.spawn.last_was_gap);
        assert_eq!(state.pool.len(), 30);
        assert_eq!(state.pool.rightmost_x(), Some(928.0));
        // The restarting press does not also jump
        assert_eq!(state.player.body.vel.y, 0.0);
    }

    #[test]
    fn test_stale_attack_does_not_survive_restart() {
        let mut state = GameState::default();
        state.player.request_attack(&Tuning::default());
        state.trigger_game_over(GameOverCause::Fell);
        state.restart();
        state.drain_events();

        for _ in 0..20 {
            step(&mut state, &TickInput::default(), &grounded());
        }
        assert!(!state.drain_events().contains(&GameEvent::AttackEnded));
    }

    #[test]
    fn test_zero_ms_attack_covers_two_ticks() {
        let mut state = GameState::new(Tuning {
            attack_duration_ms: 0,
            ..Default::default()
        });
        let attack = TickInput {
            attack_pressed: true,
            ..Default::default()
        };

        step(&mut state, &attack, &grounded());
        assert!(state.hitbox().is_some());
        step(&mut state, &TickInput::default(), &grounded());
        assert!(state.hitbox().is_some());
        step(&mut state, &TickInput::default(), &grounded());
        assert!(state.hitbox().is_none());
        assert!(state.drain_events().contains(&GameEvent::AttackEnded));
    }

    #[test]
    fn test_old_run_contact_after_restart_ignored() {
        let mut state = GameState::default();
        let old_hazard = state.spawn_hazard(960.0);
        state.trigger_game_over(GameOverCause::HazardContact {
            hazard_id: old_hazard,
        });
        let press = TickInput {
            press: Some(Vec2::new(400.0, 300.0)),
            ..Default::default()
        };
        step(&mut state, &press, &grounded());
        assert_eq!(state.phase, RunPhase::Running);

        let new_hazard = state.spawn_hazard(960.0);
        assert_ne!(new_hazard, old_hazard);

        let late = Contacts {
            player_grounded: true,
            player_hazards: vec![old_hazard],
            ..Default::default()
        };
        step(&mut state, &TickInput::default(), &late);
        assert_eq!(state.phase, RunPhase::Running);
        assert!(state.hazards.iter().any(|h| h.id == new_hazard));
    }
}
