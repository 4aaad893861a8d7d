//! Static stage table: shot allowance and target layout per stage.

use crate::constants::{STAGES_MAX, STAGE_ORIGIN_X, STAGE_ORIGIN_Y, STAGE_SPACING};
use crate::entities::Target;

#[derive(Debug)]
pub struct StageConfig {
    pub shots_allowed: u32,
    /// Offsets from the stage origin in half-grid units.
    pub offsets: &'static [(i32, i32)],
}

const STAGE_1: StageConfig = StageConfig {
    shots_allowed: 5,
    offsets: &[(-5, 0), (-4, 0), (4, 0), (5, 0)],
};

const STAGE_2: StageConfig = StageConfig {
    shots_allowed: 5,
    offsets: &[(-6, -2), (-5, -2), (-4, -2), (4, 2), (5, 2), (6, 2)],
};

const STAGE_3: StageConfig = StageConfig {
    shots_allowed: 5,
    offsets: &[
        (0, -2),
        (0, -1),
        (-2, 0),
        (-1, 0),
        (0, 0),
        (1, 0),
        (2, 0),
        (0, 1),
        (0, 2),
        (6, 3),
    ],
};

const STAGE_4: StageConfig = StageConfig {
    shots_allowed: 4,
    offsets: &[
        (-6, -3),
        (-5, -2),
        (-4, -1),
        (-3, 0),
        (3, 0),
        (4, -1),
        (5, -2),
        (6, -3),
        (-1, 3),
        (0, 3),
        (1, 3),
        (0, -4),
    ],
};

const STAGE_5: StageConfig = StageConfig {
    shots_allowed: 3,
    offsets: &[
        (-7, -4),
        (-6, -3),
        (-5, -2),
        (-4, -2),
        (-3, -1),
        (-2, 0),
        (-1, 0),
        (1, 0),
        (2, 1),
        (3, 2),
        (4, 2),
        (5, 3),
        (6, 4),
        (7, 4),
    ],
};

/// Look up a stage (1-based).  Out-of-range numbers clamp to the table.
pub fn stage_config(stage: u32) -> &'static StageConfig {
    match stage.clamp(1, STAGES_MAX) {
        1 => &STAGE_1,
        2 => &STAGE_2,
        3 => &STAGE_3,
        4 => &STAGE_4,
        _ => &STAGE_5,
    }
}

/// Position of a half-grid offset on screen.
pub fn offset_to_position(dx: i32, dy: i32) -> (i32, i32) {
    (
        STAGE_ORIGIN_X + dx * STAGE_SPACING / 2,
        STAGE_ORIGIN_Y + dy * STAGE_SPACING / 2,
    )
}

/// Build a fresh target sequence for `stage`.
pub fn build_targets(stage: u32) -> Vec<Target> {
    stage_config(stage)
        .offsets
        .iter()
        .map(|&(dx, dy)| {
            let (x, y) = offset_to_position(dx, dy);
            Target::new(x, y)
        })
        .collect()
}
