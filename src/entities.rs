//! All game entity types: pure data, no rules.
//!
//! Rules live in `compute`; drawing lives in `draw`.

// ── Phases ────────────────────────────────────────────────────────────────────

/// The active state of the per-frame controller.  Variants carry only the
/// timing data their own transition rule needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Title,
    Ready,
    Moving,
    /// Coasting to rest; `stopped_at` is refreshed while still moving.
    Stop { stopped_at: u64 },
    /// Projectile in flight; `last_active` is the last frame anything moved.
    Fire { last_active: u64 },
    /// Slid off the right edge.
    Fail { failed_at: u64 },
    /// All targets destroyed; `bonus` is the unused-shot award.
    Clear { bonus: i32 },
    GameOver,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Title => "Title",
            Phase::Ready => "Ready",
            Phase::Moving => "Moving",
            Phase::Stop { .. } => "Stop",
            Phase::Fire { .. } => "Fire",
            Phase::Fail { .. } => "Fail",
            Phase::Clear { .. } => "Clear",
            Phase::GameOver => "GameOver",
        }
    }
}

// ── Collaborator traffic ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEffect {
    /// Marker starts sliding
    Move,
    /// Fire button released
    Stop,
    /// Projectile launched
    Fire,
    /// A target starts exploding
    Hit,
    /// Slid off the edge
    Fail,
    /// Stage cleared
    Success,
    /// Out of shots
    Failure,
}

/// Side effects requested by the core, drained by the driver every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundEffect),
    MusicStart,
    MusicStop,
}

/// Button state sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub fire_held: bool,
    pub fire_pressed: bool,
    pub quit_pressed: bool,
}

// ── Targets ───────────────────────────────────────────────────────────────────

/// A stationary target.  Goes alive → exploding → dead and never revives.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub x: i32,
    pub y: i32,
    pub alive: bool,
    pub exploding_since: Option<u64>,
    pub explosion_max_radius: f32,
}

impl Target {
    pub fn new(x: i32, y: i32) -> Self {
        Target {
            x,
            y,
            alive: true,
            exploding_since: None,
            explosion_max_radius: 0.0,
        }
    }

    pub fn is_exploding(&self) -> bool {
        self.exploding_since.is_some()
    }
}

// ── Master session ────────────────────────────────────────────────────────────

/// Everything one running game mutates.  Created once, then updated in place
/// by `compute::step`.
#[derive(Clone, Debug)]
pub struct Session {
    pub score: i32,
    /// Best score seen so far; loaded and persisted by the driver.
    pub high_score: i32,
    pub stage: u32,
    pub shots_used: u32,
    pub shots_allowed: u32,
    pub combo: u32,
    /// Combo frozen at the start of the current Fire frame; scales explosions.
    pub combo_before_shot: u32,
    pub combo_display_started_at: Option<u64>,
    pub player_x: f32,
    pub player_vx: f32,
    pub player_exists: bool,
    pub projectile_y: Option<f32>,
    /// Fixed-size arena: indices are stable for the whole stage.
    pub targets: Vec<Target>,
    pub music_playing: bool,
    pub phase: Phase,
    /// Frame number of the most recent `step`.
    pub frame: u64,
    pub events: Vec<GameEvent>,
}
