//! Cyber Raid entry point
//!
//! Headless host: stands in for the physics, input and presentation
//! collaborators with the bare minimum needed to exercise the simulation.
//!
//! Usage: `cyber-raid [tuning.json] [ticks]`

use glam::Vec2;

use cyber_raid::consts::{GAME_OVER_PROMPT, SIM_DT};
use cyber_raid::sim::{Contacts, GameEvent, GameState, RngSource, TickInput, tick};
use cyber_raid::Tuning;

/// Player gravity (units/s²)
const GRAVITY: f32 = 1000.0;
const PLAYER_HALF: Vec2 = Vec2::new(12.0, 16.0);
const SEGMENT_HALF: Vec2 = Vec2::new(16.0, 16.0);
const HAZARD_HALF: Vec2 = Vec2::new(12.0, 12.0);
const DEFAULT_TICKS: u64 = 60 * 120;

fn main() {
    env_logger::init();
    log::info!("Cyber Raid (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = args.next().map(|path| load_tuning(&path)).unwrap_or_default();
    let ticks = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let mut state = GameState::new(tuning.sanitized());
    let mut rng = RngSource::thread();
    let mut best = 0u64;

    for _ in 0..ticks {
        let contacts = step_physics(&mut state, SIM_DT);
        let input = autopilot(&state);
        tick(&mut state, &input, &contacts, &mut rng);

        for event in state.drain_events() {
            match event {
                GameEvent::GameOver { cause, score } => {
                    log::info!("{} ({:?})", state.score.label(), cause);
                    log::debug!("{}", GAME_OVER_PROMPT.replace('\n', " - "));
                    best = best.max(score);
                }
                GameEvent::HazardDestroyed { id, pos } => {
                    log::debug!("hazard {} destroyed at {}", id, pos);
                }
                _ => {}
            }
        }
    }

    println!("Runs: {}", state.run_index + 1);
    println!("Best: {}", best);
}

fn load_tuning(path: &str) -> Tuning {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Cannot read {}: {} - using default tuning", path, e);
            return Tuning::default();
        }
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Invalid tuning in {}: {} - using defaults", path, e);
            Tuning::default()
        }
    }
}

/// Minimal kinematic stand-in for the physics engine
fn step_physics(state: &mut GameState, dt: f32) -> Contacts {
    let mut contacts = Contacts::default();
    // Physics is paused on game over
    if !state.is_running() {
        return contacts;
    }

    for seg in state.pool.segments_mut() {
        seg.body.pos += seg.body.vel * dt;
    }
    for hazard in &mut state.hazards {
        hazard.body.pos += hazard.body.vel * dt;
    }

    let player = &mut state.player.body;
    let prev_bottom = player.pos.y + PLAYER_HALF.y;
    player.vel.y += GRAVITY * dt;
    player.pos += player.vel * dt;
    let bottom = player.pos.y + PLAYER_HALF.y;

    if player.vel.y >= 0.0 {
        let landing = state.pool.segments().iter().filter(|s| s.is_solid()).find(|s| {
            let top = s.body.pos.y - SEGMENT_HALF.y;
            (s.body.pos.x - player.pos.x).abs() <= SEGMENT_HALF.x + PLAYER_HALF.x
                && bottom >= top
                && prev_bottom <= top + 1.0
        });
        if let Some(seg) = landing {
            player.pos.y = seg.body.pos.y - SEGMENT_HALF.y - PLAYER_HALF.y;
            player.vel.y = 0.0;
            contacts.player_grounded = true;
        }
    }

    let player_pos = player.pos;
    let hitbox = state.hitbox();
    for hazard in &state.hazards {
        let d = (hazard.body.pos - player_pos).abs();
        if d.x <= PLAYER_HALF.x + HAZARD_HALF.x && d.y <= PLAYER_HALF.y + HAZARD_HALF.y {
            contacts.player_hazards.push(hazard.id);
        }
        if hitbox.is_some_and(|hb| hb.overlaps(hazard.body.pos, HAZARD_HALF)) {
            contacts.hitbox_hazards.push(hazard.id);
        }
    }
    contacts
}

/// Jumps gaps, slashes hazards, restarts after a game over
fn autopilot(state: &GameState) -> TickInput {
    let player = state.player.body.pos;
    if !state.is_running() {
        return TickInput {
            press: Some(player),
            ..Default::default()
        };
    }

    let ground_ahead = state.pool.segments().iter().any(|s| {
        let dx = s.body.pos.x - (player.x + 40.0);
        s.is_solid() && dx.abs() <= SEGMENT_HALF.x
    });
    let hazard_ahead = state.hazards.iter().any(|h| {
        let dx = h.body.pos.x - player.x;
        (20.0..80.0).contains(&dx)
    });

    TickInput {
        jump_held: !ground_ahead,
        attack_pressed: hazard_ahead,
        ..Default::default()
    }
}
