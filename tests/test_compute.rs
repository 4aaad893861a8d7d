use slide_and_shoot::compute::*;
use slide_and_shoot::constants::*;
use slide_and_shoot::entities::*;
use slide_and_shoot::stages::build_targets;

const IDLE: InputSnapshot = InputSnapshot {
    fire_held: false,
    fire_pressed: false,
    quit_pressed: false,
};
const PRESS: InputSnapshot = InputSnapshot {
    fire_held: true,
    fire_pressed: true,
    quit_pressed: false,
};
const HOLD: InputSnapshot = InputSnapshot {
    fire_held: true,
    fire_pressed: false,
    quit_pressed: false,
};

/// A session already sitting in Ready on stage 1.
fn ready_session() -> Session {
    let mut s = init_session(0);
    step(&mut s, &PRESS, 1);
    s.events.clear();
    s
}

/// A session in Fire at frame 0 with the given targets and the player at `x`.
fn fire_session(targets: Vec<Target>, x: f32) -> Session {
    let mut s = ready_session();
    s.targets = targets;
    s.player_x = x;
    s.phase = enter_fire(&mut s, 0);
    s.events.clear();
    s
}

/// Step with no input until the phase is no longer Fire.
fn run_fire_to_end(s: &mut Session, mut frame: u64) -> u64 {
    while matches!(s.phase, Phase::Fire { .. }) {
        frame += 1;
        step(s, &IDLE, frame);
        assert!(frame < 1_000, "Fire phase never ended");
    }
    frame
}

fn hit_count(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| **e == GameEvent::Sound(SoundEffect::Hit))
        .count()
}

// ── init_session / Title ──────────────────────────────────────────────────────

#[test]
fn init_session_starts_on_title_with_music() {
    let s = init_session(42);
    assert_eq!(s.phase, Phase::Title);
    assert!(!s.player_exists);
    assert!(s.music_playing);
    assert_eq!(s.events, vec![GameEvent::MusicStart]);
    assert_eq!(s.high_score, 42);
}

#[test]
fn title_waits_for_fire() {
    let mut s = init_session(0);
    step(&mut s, &IDLE, 1);
    step(&mut s, &HOLD, 2);
    assert_eq!(s.phase, Phase::Title);
}

#[test]
fn title_fire_starts_stage_one() {
    let mut s = init_session(0);
    s.score = 99;
    step(&mut s, &PRESS, 1);
    assert_eq!(s.phase, Phase::Ready);
    assert_eq!(s.stage, 1);
    assert_eq!(s.score, 0);
    assert_eq!(s.shots_allowed, 5);
    assert_eq!(s.shots_used, 1);
    assert_eq!(s.targets.len(), 4);
    assert!(s.player_exists);
    assert_eq!(s.player_x, PLAYER_START_X);
    assert_eq!(s.player_vx, 0.0);
}

// ── Ready / Moving ────────────────────────────────────────────────────────────

#[test]
fn ready_fire_starts_moving() {
    let mut s = ready_session();
    step(&mut s, &IDLE, 2);
    assert_eq!(s.phase, Phase::Ready);
    step(&mut s, &PRESS, 3);
    assert_eq!(s.phase, Phase::Moving);
    assert_eq!(s.events, vec![GameEvent::Sound(SoundEffect::Move)]);
    assert_eq!(s.player_x, PLAYER_START_X);
}

#[test]
fn moving_accelerates_up_to_cap() {
    let mut s = ready_session();
    step(&mut s, &PRESS, 2);
    step(&mut s, &HOLD, 3);
    assert!((s.player_vx - 0.1).abs() < 1e-6);
    assert!((s.player_x - (PLAYER_START_X + 0.1)).abs() < 1e-5);
    for f in 4..40 {
        step(&mut s, &HOLD, f);
    }
    assert_eq!(s.player_vx, PLAYER_MAX_VX);
    assert_eq!(s.phase, Phase::Moving);
}

#[test]
fn moving_release_stops() {
    let mut s = ready_session();
    step(&mut s, &PRESS, 2);
    step(&mut s, &HOLD, 3);
    s.events.clear();
    step(&mut s, &IDLE, 4);
    assert_eq!(s.phase, Phase::Stop { stopped_at: 4 });
    assert_eq!(s.events, vec![GameEvent::Sound(SoundEffect::Stop)]);
}

#[test]
fn moving_reaching_boundary_exactly_is_not_fail() {
    let mut s = ready_session();
    s.phase = Phase::Moving;
    s.player_x = RIGHT_BOUNDARY - PLAYER_MAX_VX;
    s.player_vx = PLAYER_MAX_VX;
    step(&mut s, &HOLD, 10);
    assert_eq!(s.player_x, RIGHT_BOUNDARY);
    assert_eq!(s.phase, Phase::Moving);

    step(&mut s, &HOLD, 11);
    assert_eq!(s.phase, Phase::Fail { failed_at: 11 });
}

// ── Stop ──────────────────────────────────────────────────────────────────────

#[test]
fn stop_coasts_to_rest_then_settles_before_fire() {
    let mut s = ready_session();
    s.phase = Phase::Stop { stopped_at: 10 };
    s.player_x = 50.0;
    s.player_vx = 0.3;

    step(&mut s, &IDLE, 11);
    step(&mut s, &IDLE, 12);
    step(&mut s, &IDLE, 13);
    assert_eq!(s.player_vx, 0.0);
    assert!((s.player_x - 50.6).abs() < 1e-4);
    assert_eq!(s.phase, Phase::Stop { stopped_at: 13 });

    step(&mut s, &IDLE, 13 + SETTLE_DELAY - 1);
    assert_eq!(s.phase, Phase::Stop { stopped_at: 13 });

    step(&mut s, &IDLE, 13 + SETTLE_DELAY);
    assert_eq!(
        s.phase,
        Phase::Fire {
            last_active: 13 + SETTLE_DELAY
        }
    );
    assert_eq!(s.projectile_y, Some(PROJECTILE_SPAWN_Y));
}

#[test]
fn stop_coasting_off_edge_fails() {
    let mut s = ready_session();
    s.phase = Phase::Stop { stopped_at: 10 };
    s.player_x = RIGHT_BOUNDARY - 0.5;
    s.player_vx = 1.0;
    step(&mut s, &IDLE, 11);
    assert_eq!(s.phase, Phase::Fail { failed_at: 11 });
}

#[test]
fn stop_ignores_fire_button() {
    let mut s = ready_session();
    s.phase = Phase::Stop { stopped_at: 10 };
    s.player_vx = 0.0;
    step(&mut s, &PRESS, 11);
    assert_eq!(s.phase, Phase::Stop { stopped_at: 10 });
}

// ── Fail ──────────────────────────────────────────────────────────────────────

#[test]
fn fail_applies_penalty_and_hides_player() {
    let mut s = ready_session();
    s.score = 3;
    s.combo = 2;
    s.phase = Phase::Moving;
    s.player_x = RIGHT_BOUNDARY;
    s.player_vx = 1.0;
    s.events.clear();
    step(&mut s, &HOLD, 20);
    assert_eq!(s.phase, Phase::Fail { failed_at: 20 });
    assert_eq!(s.score, 3 - FAIL_PENALTY);
    assert_eq!(s.combo, 0);
    assert!(!s.player_exists);
    assert_eq!(s.events, vec![GameEvent::Sound(SoundEffect::Fail)]);
}

#[test]
fn fail_returns_to_ready_after_penalty_time() {
    let mut s = ready_session();
    s.phase = Phase::Fail { failed_at: 100 };
    step(&mut s, &PRESS, 100 + FAIL_DURATION - 1);
    assert_eq!(s.phase, Phase::Fail { failed_at: 100 });
    step(&mut s, &IDLE, 100 + FAIL_DURATION);
    assert_eq!(s.phase, Phase::Ready);
    assert_eq!(s.shots_used, 2);
    assert!(s.player_exists);
}

#[test]
fn fail_on_last_shot_is_game_over() {
    let mut s = ready_session();
    s.shots_used = s.shots_allowed;
    s.phase = Phase::Fail { failed_at: 0 };
    step(&mut s, &IDLE, FAIL_DURATION);
    assert_eq!(s.phase, Phase::GameOver);
    assert!(!s.music_playing);
}

// ── Targets ───────────────────────────────────────────────────────────────────

#[test]
fn exploding_radius_grows_linearly() {
    let mut t = Target::new(0, 0);
    assert_eq!(exploding_radius(&t, 5), 0.0);
    t.exploding_since = Some(10);
    t.explosion_max_radius = 12.0;
    assert_eq!(exploding_radius(&t, 10), 0.0);
    assert!((exploding_radius(&t, 15) - 6.0).abs() < 1e-6);
    assert!((exploding_radius(&t, 20) - 12.0).abs() < 1e-6);
    assert!((exploding_radius(&t, 30) - 12.0).abs() < 1e-6);
}

#[test]
fn explosion_radius_shrinks_with_combo() {
    assert_eq!(explosion_max_radius(0), 12.0);
    assert_eq!(explosion_max_radius(1), 8.5);
    assert!(explosion_max_radius(5) < explosion_max_radius(4));
}

#[test]
fn projectile_hit_starts_explosion() {
    let mut s = fire_session(vec![Target::new(64, 48)], 64.0);
    s.projectile_y = Some(50.0);
    update_target(&mut s, 0, 7);
    let t = &s.targets[0];
    assert_eq!(t.exploding_since, Some(7));
    assert!(t.alive);
    assert_eq!(t.explosion_max_radius, 12.0);
    assert_eq!(s.projectile_y, None);
    assert_eq!(s.combo, 1);
    assert_eq!(s.score, 1);
    assert_eq!(s.combo_display_started_at, Some(7));
    assert_eq!(hit_count(&s.events), 1);
}

#[test]
fn projectile_misses_outside_reach() {
    let mut s = fire_session(vec![Target::new(64, 48)], 64.0);
    s.projectile_y = Some(53.0);
    update_target(&mut s, 0, 7);
    assert_eq!(s.targets[0].exploding_since, None);
    assert_eq!(s.projectile_y, Some(53.0));
    assert_eq!(s.score, 0);
}

#[test]
fn hit_is_idempotent_while_exploding() {
    let mut s = fire_session(vec![Target::new(64, 48)], 64.0);
    s.projectile_y = Some(48.0);
    update_target(&mut s, 0, 7);
    s.projectile_y = Some(48.0);
    update_target(&mut s, 0, 8);
    assert_eq!(s.combo, 1);
    assert_eq!(s.score, 1);
    assert_eq!(s.targets[0].exploding_since, Some(7));
    assert_eq!(s.projectile_y, Some(48.0));
}

#[test]
fn dead_target_lets_projectile_pass() {
    let mut t = Target::new(64, 48);
    t.alive = false;
    let mut s = fire_session(vec![t], 64.0);
    s.projectile_y = Some(48.0);
    update_target(&mut s, 0, 7);
    assert_eq!(s.projectile_y, Some(48.0));
    assert_eq!(s.score, 0);
}

#[test]
fn explosion_expires_into_death() {
    let mut s = fire_session(vec![Target::new(64, 48)], 0.0);
    s.projectile_y = None;
    s.targets[0].exploding_since = Some(100);
    s.targets[0].explosion_max_radius = 12.0;
    update_target(&mut s, 0, 100 + EXPLOSION_DURATION);
    assert!(s.targets[0].is_exploding());
    update_target(&mut s, 0, 101 + EXPLOSION_DURATION);
    assert!(!s.targets[0].alive);
    assert!(!s.targets[0].is_exploding());
}

#[test]
fn chain_reaction_reaches_neighbour_within_radius() {
    let mut s = fire_session(vec![Target::new(64, 48), Target::new(72, 48)], 0.0);
    s.projectile_y = None;
    s.combo = 1;
    s.targets[0].exploding_since = Some(100);
    s.targets[0].explosion_max_radius = 12.0;

    // radius 4.8 + 3 < 8: not yet
    update_target(&mut s, 1, 104);
    assert!(!s.targets[1].is_exploding());

    // radius 6 + 3 > 8
    update_target(&mut s, 1, 105);
    assert_eq!(s.targets[1].exploding_since, Some(105));
    assert_eq!(s.combo, 2);
    assert_eq!(s.score, 2);
}

#[test]
fn chained_blast_is_sized_by_combo_at_start_of_frame() {
    // Stage 1 pair at x = 24 and 32, fired from directly under the first.
    let mut s = fire_session(build_targets(1), 24.0);
    let mut frame = 0;
    while !s.targets[0].is_exploding() {
        frame += 1;
        step(&mut s, &IDLE, frame);
        assert!(frame < 100, "projectile never hit");
    }
    // y = 128 - 3 * 26 = 50 is the first position within reach of y = 48.
    assert_eq!(frame, 26);
    assert_eq!(s.targets[0].explosion_max_radius, 12.0);
    assert!(!s.targets[1].is_exploding());

    while !s.targets[1].is_exploding() {
        frame += 1;
        step(&mut s, &IDLE, frame);
        assert!(frame < 100, "chain never reached the neighbour");
    }
    // Five frames in the first blast is 6 px, enough to reach 8 px away.
    assert_eq!(frame, 31);
    assert_eq!(s.targets[1].explosion_max_radius, 8.5);
    assert_eq!(s.combo, 2);
    assert_eq!(s.score, 3);
}

#[test]
fn chain_reaction_ignores_distant_targets() {
    let mut s = fire_session(vec![Target::new(64, 48), Target::new(80, 48)], 0.0);
    s.projectile_y = None;
    s.targets[0].exploding_since = Some(100);
    s.targets[0].explosion_max_radius = 12.0;
    for f in 100..=110 {
        update_target(&mut s, 1, f);
    }
    assert!(!s.targets[1].is_exploding());
}

// ── Fire ──────────────────────────────────────────────────────────────────────

#[test]
fn fire_entry_spawns_projectile_and_resets_combo() {
    let mut s = ready_session();
    s.combo = 4;
    s.combo_display_started_at = Some(3);
    let phase = enter_fire(&mut s, 9);
    assert_eq!(phase, Phase::Fire { last_active: 9 });
    assert_eq!(s.projectile_y, Some(PROJECTILE_SPAWN_Y));
    assert_eq!(s.combo, 0);
    assert_eq!(s.combo_display_started_at, None);
    assert_eq!(s.events.last(), Some(&GameEvent::Sound(SoundEffect::Fire)));
}

#[test]
fn fire_projectile_climbs_and_leaves_screen() {
    let mut s = fire_session(vec![Target::new(64, 48)], 10.0);
    step(&mut s, &IDLE, 1);
    assert_eq!(s.projectile_y, Some(PROJECTILE_SPAWN_Y - PROJECTILE_SPEED));
    let end = run_fire_to_end(&mut s, 1);
    assert_eq!(s.projectile_y, None);
    assert_eq!(s.phase, Phase::Ready);
    assert_eq!(s.shots_used, 2);
    // y = 128 - 3n is last on screen at n = 46
    assert_eq!(end, 46 + SETTLE_DELAY);
}

#[test]
fn combo_scores_progressively_along_a_chain() {
    let targets = vec![Target::new(64, 48), Target::new(72, 48), Target::new(80, 48)];
    let mut s = fire_session(targets, 64.0);
    run_fire_to_end(&mut s, 0);
    assert_eq!(s.combo, 3);
    assert_eq!(s.phase, Phase::Clear { bonus: 4 });
    assert_eq!(s.score, 1 + 2 + 3 + 4);
    assert_eq!(hit_count(&s.events), 3);
}

#[test]
fn fire_out_of_shots_is_game_over() {
    let mut s = fire_session(vec![Target::new(64, 48)], 0.0);
    s.shots_used = s.shots_allowed;
    s.projectile_y = None;
    step(&mut s, &IDLE, SETTLE_DELAY - 1);
    assert!(matches!(s.phase, Phase::Fire { .. }));
    step(&mut s, &IDLE, SETTLE_DELAY);
    assert_eq!(s.phase, Phase::GameOver);
    assert_eq!(s.events, vec![GameEvent::MusicStop, GameEvent::Sound(SoundEffect::Failure)]);
}

#[test]
fn clear_takes_priority_over_game_over() {
    let mut dead = Target::new(64, 48);
    dead.alive = false;
    let mut s = fire_session(vec![dead], 0.0);
    s.shots_used = s.shots_allowed;
    s.projectile_y = None;
    step(&mut s, &IDLE, SETTLE_DELAY);
    assert_eq!(s.phase, Phase::Clear { bonus: 0 });
}

// ── Clear / GameOver ──────────────────────────────────────────────────────────

#[test]
fn clear_awards_unused_shots() {
    let mut s = ready_session();
    s.score = 10;
    s.shots_used = 2;
    let phase = enter_clear(&mut s);
    assert_eq!(phase, Phase::Clear { bonus: 3 });
    assert_eq!(s.score, 13);
    assert!(!s.music_playing);
}

#[test]
fn clear_advances_to_next_stage_on_fire() {
    let mut s = ready_session();
    s.shots_used = 3;
    s.phase = enter_clear(&mut s);
    step(&mut s, &IDLE, 50);
    assert_eq!(s.stage, 1);
    step(&mut s, &PRESS, 51);
    assert_eq!(s.phase, Phase::Ready);
    assert_eq!(s.stage, 2);
    assert_eq!(s.shots_used, 1);
    assert_eq!(s.targets, build_targets(2));
    assert!(s.music_playing);
}

#[test]
fn stage_three_layout_after_clear() {
    let mut s = ready_session();
    s.stage = 2;
    s.phase = enter_clear(&mut s);
    step(&mut s, &PRESS, 60);
    assert_eq!(s.stage, 3);
    assert_eq!(s.targets.len(), 10);
    assert_eq!(s.targets, build_targets(3));
    assert!(s.targets.iter().all(|t| t.alive && !t.is_exploding()));
}

#[test]
fn start_stage_resets_shot_counter() {
    let mut s = ready_session();
    s.shots_used = 4;
    start_stage(&mut s, 3);
    assert_eq!(s.shots_used, 0);
    assert_eq!(s.shots_allowed, 5);
    assert_eq!(s.targets.len(), 10);
}

#[test]
fn final_stage_clear_is_absorbing() {
    let mut s = ready_session();
    s.stage = STAGES_MAX;
    s.phase = enter_clear(&mut s);
    let phase = s.phase;
    for f in 100..110 {
        step(&mut s, &PRESS, f);
    }
    assert_eq!(s.phase, phase);
    assert_eq!(s.stage, STAGES_MAX);
}

#[test]
fn game_over_returns_to_title() {
    let mut s = ready_session();
    s.phase = enter_game_over(&mut s);
    step(&mut s, &IDLE, 5);
    assert_eq!(s.phase, Phase::GameOver);
    s.events.clear();
    step(&mut s, &PRESS, 6);
    assert_eq!(s.phase, Phase::Title);
    assert!(!s.player_exists);
    assert_eq!(s.events, vec![GameEvent::MusicStart]);
}

#[test]
fn high_score_tracks_best_score() {
    let mut s = init_session(5);
    step(&mut s, &PRESS, 1);
    s.score = 8;
    step(&mut s, &IDLE, 2);
    assert_eq!(s.high_score, 8);
    s.score = 2;
    step(&mut s, &IDLE, 3);
    assert_eq!(s.high_score, 8);
}

#[test]
fn drain_events_empties_queue() {
    let mut s = init_session(0);
    assert_eq!(drain_events(&mut s), vec![GameEvent::MusicStart]);
    assert!(s.events.is_empty());
}

// ── End to end ────────────────────────────────────────────────────────────────

/// Press, hold for `hold` frames, release, and wait until the shot resolves.
fn play_shot(s: &mut Session, frame: &mut u64, hold: u32) {
    *frame += 1;
    step(s, &PRESS, *frame);
    for _ in 0..hold {
        *frame += 1;
        step(s, &HOLD, *frame);
    }
    while matches!(s.phase, Phase::Moving | Phase::Stop { .. }) {
        *frame += 1;
        step(s, &IDLE, *frame);
    }
    assert!(matches!(s.phase, Phase::Fire { .. }), "slid off the edge");
    *frame = run_fire_to_end(s, *frame);
}

/// Hold time that parks the marker within 2px of `aim`.
fn hold_for(s: &Session, frame: u64, aim: f32) -> u32 {
    for hold in 1..120 {
        let mut trial = s.clone();
        let mut f = frame + 1;
        step(&mut trial, &PRESS, f);
        for _ in 0..hold {
            f += 1;
            step(&mut trial, &HOLD, f);
        }
        while matches!(trial.phase, Phase::Moving | Phase::Stop { .. }) {
            f += 1;
            step(&mut trial, &IDLE, f);
        }
        if matches!(trial.phase, Phase::Fire { .. }) && (trial.player_x - aim).abs() < 2.0 {
            return hold;
        }
    }
    panic!("no hold time reaches x={}", aim);
}

#[test]
fn stage_one_cleared_in_two_shots() {
    let mut s = init_session(0);
    let mut frame = 1;
    step(&mut s, &PRESS, frame);
    assert_eq!(s.phase, Phase::Ready);

    let hold = hold_for(&s, frame, 24.0);
    play_shot(&mut s, &mut frame, hold);
    assert_eq!(s.phase, Phase::Ready);
    assert_eq!(s.score, 1 + 2);
    assert_eq!(s.targets.iter().filter(|t| !t.alive).count(), 2);

    let hold = hold_for(&s, frame, 96.0);
    play_shot(&mut s, &mut frame, hold);
    assert_eq!(s.shots_used, 2);
    assert_eq!(s.phase, Phase::Clear { bonus: 3 });
    assert_eq!(s.score, (1 + 2) + (1 + 2) + 3);
    assert!(s.targets.iter().all(|t| !t.alive));
}
