//! Game rules: the per-frame phase machine and the target/explosion model.
//!
//! `step` is the only entry point the driver needs.  Every phase has an
//! `enter_*` function (entry side effects, returns the new phase) and an
//! `update_*` function (per-frame rule, returns the next phase).  Requests
//! for the presentation layer are queued on `Session::events`.

use std::mem::discriminant;

use log::{debug, info};

use crate::constants::*;
use crate::entities::{GameEvent, InputSnapshot, Phase, Session, SoundEffect, Target};
use crate::stages::{build_targets, stage_config};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the session the program starts with: Title screen, music on.
pub fn init_session(high_score: i32) -> Session {
    let mut session = Session {
        score: 0,
        high_score,
        stage: 1,
        shots_used: 0,
        shots_allowed: stage_config(1).shots_allowed,
        combo: 0,
        combo_before_shot: 0,
        combo_display_started_at: None,
        player_x: PLAYER_START_X,
        player_vx: 0.0,
        player_exists: false,
        projectile_y: None,
        targets: build_targets(1),
        music_playing: false,
        phase: Phase::Title,
        frame: 0,
        events: Vec::new(),
    };
    session.phase = enter_title(&mut session);
    session
}

/// Load a stage's configuration: fresh targets, zero shots used.
pub fn start_stage(session: &mut Session, stage: u32) {
    let config = stage_config(stage);
    session.stage = stage;
    session.shots_allowed = config.shots_allowed;
    session.shots_used = 0;
    session.targets = build_targets(stage);
    session.projectile_y = None;
    session.combo = 0;
    session.combo_before_shot = 0;
    session.combo_display_started_at = None;
    info!(
        "stage {} started: {} targets, {} shots",
        stage,
        session.targets.len(),
        session.shots_allowed
    );
}

// ── Frame step ───────────────────────────────────────────────────────────────

/// Advance the session by one frame.
pub fn step(session: &mut Session, input: &InputSnapshot, frame: u64) {
    session.frame = frame;

    let current = session.phase;
    let next = match current {
        Phase::Title => update_title(session, input),
        Phase::Ready => update_ready(session, input),
        Phase::Moving => update_moving(session, input, frame),
        Phase::Stop { stopped_at } => update_stop(session, stopped_at, frame),
        Phase::Fire { last_active } => update_fire(session, last_active, frame),
        Phase::Fail { failed_at } => update_fail(session, failed_at, frame),
        Phase::Clear { bonus } => update_clear(session, input, bonus),
        Phase::GameOver => update_game_over(session, input),
    };

    if discriminant(&current) != discriminant(&next) {
        debug!("frame {}: {} -> {}", frame, current.name(), next.name());
    }
    session.phase = next;
    session.high_score = session.high_score.max(session.score);
}

/// Remove and return the presentation requests queued since the last drain.
pub fn drain_events(session: &mut Session) -> Vec<GameEvent> {
    std::mem::take(&mut session.events)
}

// ── Presentation requests ────────────────────────────────────────────────────

fn play(session: &mut Session, effect: SoundEffect) {
    session.events.push(GameEvent::Sound(effect));
}

fn ensure_music(session: &mut Session) {
    if !session.music_playing {
        session.music_playing = true;
        session.events.push(GameEvent::MusicStart);
    }
}

fn stop_music(session: &mut Session) {
    if session.music_playing {
        session.music_playing = false;
        session.events.push(GameEvent::MusicStop);
    }
}

// ── Title ────────────────────────────────────────────────────────────────────

pub fn enter_title(session: &mut Session) -> Phase {
    session.player_exists = false;
    ensure_music(session);
    Phase::Title
}

fn update_title(session: &mut Session, input: &InputSnapshot) -> Phase {
    if !input.fire_pressed {
        return Phase::Title;
    }
    start_stage(session, 1);
    session.score = 0;
    enter_ready(session)
}

// ── Ready ────────────────────────────────────────────────────────────────────

pub fn enter_ready(session: &mut Session) -> Phase {
    session.player_exists = true;
    session.player_x = PLAYER_START_X;
    session.player_vx = 0.0;
    session.shots_used += 1;
    ensure_music(session);
    Phase::Ready
}

fn update_ready(session: &mut Session, input: &InputSnapshot) -> Phase {
    if input.fire_pressed {
        enter_moving(session)
    } else {
        Phase::Ready
    }
}

// ── Moving ───────────────────────────────────────────────────────────────────

pub fn enter_moving(session: &mut Session) -> Phase {
    play(session, SoundEffect::Move);
    Phase::Moving
}

fn update_moving(session: &mut Session, input: &InputSnapshot, frame: u64) -> Phase {
    if !input.fire_held {
        return enter_stop(session, frame);
    }
    session.player_vx = (session.player_vx + PLAYER_ACCEL).min(PLAYER_MAX_VX);
    session.player_x += session.player_vx;
    if session.player_x > RIGHT_BOUNDARY {
        return enter_fail(session, frame);
    }
    Phase::Moving
}

// ── Stop ─────────────────────────────────────────────────────────────────────

pub fn enter_stop(session: &mut Session, frame: u64) -> Phase {
    play(session, SoundEffect::Stop);
    Phase::Stop { stopped_at: frame }
}

fn update_stop(session: &mut Session, stopped_at: u64, frame: u64) -> Phase {
    if session.player_vx > 0.0 {
        session.player_x += session.player_vx;
        session.player_vx -= PLAYER_DECEL;
        if session.player_vx < VELOCITY_EPSILON {
            session.player_vx = 0.0;
        }
        if session.player_x > RIGHT_BOUNDARY {
            return enter_fail(session, frame);
        }
        return Phase::Stop { stopped_at: frame };
    }
    if frame.saturating_sub(stopped_at) < SETTLE_DELAY {
        return Phase::Stop { stopped_at };
    }
    enter_fire(session, frame)
}

// ── Fire ─────────────────────────────────────────────────────────────────────

pub fn enter_fire(session: &mut Session, frame: u64) -> Phase {
    play(session, SoundEffect::Fire);
    session.projectile_y = Some(PROJECTILE_SPAWN_Y);
    session.combo = 0;
    session.combo_display_started_at = None;
    Phase::Fire { last_active: frame }
}

fn update_fire(session: &mut Session, last_active: u64, frame: u64) -> Phase {
    if let Some(y) = session.projectile_y {
        let y = y - PROJECTILE_SPEED;
        session.projectile_y = if y < PROJECTILE_TOP { None } else { Some(y) };
    }

    session.combo_before_shot = session.combo;
    update_targets(session, frame);

    let active =
        session.projectile_y.is_some() || session.targets.iter().any(Target::is_exploding);
    if active {
        return Phase::Fire { last_active: frame };
    }
    if frame.saturating_sub(last_active) < SETTLE_DELAY {
        return Phase::Fire { last_active };
    }

    if session.targets.iter().all(|t| !t.alive) {
        enter_clear(session)
    } else if session.shots_used >= session.shots_allowed {
        enter_game_over(session)
    } else {
        enter_ready(session)
    }
}

// ── Fail ─────────────────────────────────────────────────────────────────────

pub fn enter_fail(session: &mut Session, frame: u64) -> Phase {
    play(session, SoundEffect::Fail);
    session.score -= FAIL_PENALTY;
    session.combo = 0;
    session.player_vx = 0.0;
    session.player_exists = false;
    Phase::Fail { failed_at: frame }
}

fn update_fail(session: &mut Session, failed_at: u64, frame: u64) -> Phase {
    if frame.saturating_sub(failed_at) < FAIL_DURATION {
        return Phase::Fail { failed_at };
    }
    if session.shots_used >= session.shots_allowed {
        enter_game_over(session)
    } else {
        enter_ready(session)
    }
}

// ── Clear ────────────────────────────────────────────────────────────────────

pub fn enter_clear(session: &mut Session) -> Phase {
    let bonus = session.shots_allowed as i32 - session.shots_used as i32;
    session.score += bonus;
    stop_music(session);
    play(session, SoundEffect::Success);
    info!(
        "stage {} cleared with {} of {} shots, bonus {}",
        session.stage, session.shots_used, session.shots_allowed, bonus
    );
    Phase::Clear { bonus }
}

fn update_clear(session: &mut Session, input: &InputSnapshot, bonus: i32) -> Phase {
    // The last stage's Clear is absorbing.
    if !input.fire_pressed || session.stage >= STAGES_MAX {
        return Phase::Clear { bonus };
    }
    let next = session.stage + 1;
    start_stage(session, next);
    enter_ready(session)
}

// ── GameOver ─────────────────────────────────────────────────────────────────

pub fn enter_game_over(session: &mut Session) -> Phase {
    stop_music(session);
    play(session, SoundEffect::Failure);
    info!("game over at stage {} with score {}", session.stage, session.score);
    Phase::GameOver
}

fn update_game_over(session: &mut Session, input: &InputSnapshot) -> Phase {
    if input.fire_pressed {
        enter_title(session)
    } else {
        Phase::GameOver
    }
}

// ── Targets ──────────────────────────────────────────────────────────────────

/// Current explosion radius: grows linearly to the maximum over the
/// explosion duration, zero when not exploding.
pub fn exploding_radius(target: &Target, frame: u64) -> f32 {
    match target.exploding_since {
        None => 0.0,
        Some(since) => {
            let elapsed = frame.saturating_sub(since).min(EXPLOSION_DURATION);
            elapsed as f32 / EXPLOSION_DURATION as f32 * target.explosion_max_radius
        }
    }
}

/// Maximum explosion radius for a hit made while `combo_before_shot` was
/// in effect.  Higher combos make smaller blasts.
pub fn explosion_max_radius(combo_before_shot: u32) -> f32 {
    EXPLOSION_BASE_RADIUS + EXPLOSION_COMBO_RADIUS / (combo_before_shot + 1) as f32
}

/// Update every target in arena order.
pub fn update_targets(session: &mut Session, frame: u64) {
    for index in 0..session.targets.len() {
        update_target(session, index, frame);
    }
}

/// Projectile hit, chain reaction from exploding siblings, then expiry.
pub fn update_target(session: &mut Session, index: usize, frame: u64) {
    let (tx, ty) = {
        let t = &session.targets[index];
        (t.x as f32, t.y as f32)
    };

    if let Some(py) = session.projectile_y {
        let dx = session.player_x - tx;
        let dy = py - ty;
        let reach = PROJECTILE_RADIUS + TARGET_RADIUS;
        if dx * dx + dy * dy < reach * reach && !session.targets[index].is_exploding() {
            hit(session, index, frame);
        }
    }

    let chained = session
        .targets
        .iter()
        .enumerate()
        .filter(|&(j, other)| j != index && other.is_exploding())
        .any(|(_, other)| {
            let dx = other.x as f32 - tx;
            let dy = other.y as f32 - ty;
            let reach = exploding_radius(other, frame) + TARGET_RADIUS;
            dx * dx + dy * dy < reach * reach
        });
    if chained {
        hit(session, index, frame);
    }

    let target = &mut session.targets[index];
    if let Some(since) = target.exploding_since {
        if frame.saturating_sub(since) > EXPLOSION_DURATION {
            target.alive = false;
            target.exploding_since = None;
        }
    }
}

/// Detonate a target.  No-op unless it is alive and not yet exploding.
fn hit(session: &mut Session, index: usize, frame: u64) {
    let target = &session.targets[index];
    if !target.alive || target.is_exploding() {
        return;
    }

    session.projectile_y = None;
    session.combo += 1;
    session.score += session.combo as i32;
    session.combo_display_started_at = Some(frame);

    let max_radius = explosion_max_radius(session.combo_before_shot);
    let target = &mut session.targets[index];
    target.exploding_since = Some(frame);
    target.explosion_max_radius = max_radius;

    play(session, SoundEffect::Hit);
}
