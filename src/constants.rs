//! Fixed gameplay tuning. All distances are logical pixels on the
//! 128×128 screen, all durations are frames.

pub const SCREEN_SIZE: f32 = 128.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_Y: f32 = 120.0;
pub const PLAYER_HALF_WIDTH: f32 = 4.0;
pub const PLAYER_START_X: f32 = 4.0;
/// Crossing this while sliding is a Fail.
pub const RIGHT_BOUNDARY: f32 = SCREEN_SIZE - PLAYER_HALF_WIDTH;
pub const PLAYER_ACCEL: f32 = 0.1;
pub const PLAYER_MAX_VX: f32 = 1.5;
pub const PLAYER_DECEL: f32 = 0.1;
/// Velocities below this count as stopped (float residue of the 0.1 steps).
pub const VELOCITY_EPSILON: f32 = 1e-6;

// ── Projectile ────────────────────────────────────────────────────────────────

pub const PROJECTILE_SPAWN_Y: f32 = 128.0;
pub const PROJECTILE_SPEED: f32 = 3.0;
pub const PROJECTILE_TOP: f32 = -10.0;
pub const PROJECTILE_RADIUS: f32 = 2.0;

// ── Targets ───────────────────────────────────────────────────────────────────

pub const TARGET_RADIUS: f32 = 3.0;
pub const EXPLOSION_DURATION: u64 = 10;
pub const EXPLOSION_BASE_RADIUS: f32 = 5.0;
pub const EXPLOSION_COMBO_RADIUS: f32 = 7.0;

// ── Pacing ────────────────────────────────────────────────────────────────────

pub const SETTLE_DELAY: u64 = 20;
pub const FAIL_DURATION: u64 = 40;
pub const FAIL_PENALTY: i32 = 5;
pub const COMBO_DISPLAY_FRAMES: u64 = 45;

// ── Stage layout ──────────────────────────────────────────────────────────────

pub const STAGES_MAX: u32 = 5;
pub const STAGE_ORIGIN_X: i32 = 64;
pub const STAGE_ORIGIN_Y: i32 = 48;
/// Full grid spacing; stage offsets are in half-grid units.
pub const STAGE_SPACING: i32 = 16;
