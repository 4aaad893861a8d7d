//! Pure rendering: turns a session into a list of draw commands.
//!
//! Nothing here mutates the session.  Coordinates are logical pixels on the
//! 128×128 screen; colours are indices into a 16-entry palette.

use crate::compute::exploding_radius;
use crate::constants::*;
use crate::entities::{Phase, Session};

pub const COL_BLACK: u8 = 0;
pub const COL_NAVY: u8 = 1;
pub const COL_GREY: u8 = 5;
pub const COL_SILVER: u8 = 6;
pub const COL_WHITE: u8 = 7;
pub const COL_RED: u8 = 8;
pub const COL_ORANGE: u8 = 9;
pub const COL_YELLOW: u8 = 10;
pub const COL_GREEN: u8 = 11;
pub const COL_PINK: u8 = 14;

/// Horizontal anchor of a `Text` command's `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    /// `x` is the middle of the string; the rasteriser centres in glyph cells.
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(u8),
    Rect { x: f32, y: f32, w: f32, h: f32, color: u8 },
    Circle { x: f32, y: f32, r: f32, color: u8 },
    Text {
        x: f32,
        y: f32,
        text: String,
        color: u8,
        align: Align,
    },
}

/// Draw one frame of `session` as it stands after its latest step.
pub fn render(session: &Session) -> Vec<DrawCommand> {
    let frame = session.frame;
    let mut cmds = vec![DrawCommand::Clear(COL_BLACK)];

    for target in &session.targets {
        if target.is_exploding() {
            let color = if frame % 2 == 0 { COL_YELLOW } else { COL_ORANGE };
            cmds.push(DrawCommand::Circle {
                x: target.x as f32,
                y: target.y as f32,
                r: exploding_radius(target, frame),
                color,
            });
        } else if target.alive {
            cmds.push(DrawCommand::Rect {
                x: target.x as f32 - TARGET_RADIUS,
                y: target.y as f32 - TARGET_RADIUS,
                w: TARGET_RADIUS * 2.0,
                h: TARGET_RADIUS * 2.0,
                color: COL_PINK,
            });
        }
    }

    if let (Phase::Fire { .. }, Some(y)) = (session.phase, session.projectile_y) {
        cmds.push(DrawCommand::Rect {
            x: session.player_x - PROJECTILE_RADIUS,
            y: y - 3.0,
            w: PROJECTILE_RADIUS * 2.0,
            h: 6.0,
            color: COL_YELLOW,
        });
    }

    if session.player_exists {
        cmds.push(DrawCommand::Rect {
            x: session.player_x - PLAYER_HALF_WIDTH,
            y: PLAYER_Y,
            w: PLAYER_HALF_WIDTH * 2.0,
            h: PLAYER_HALF_WIDTH * 2.0,
            color: COL_SILVER,
        });
    }

    draw_hud(&mut cmds, session);
    draw_combo(&mut cmds, session);

    match session.phase {
        Phase::Title => {
            centered(&mut cmds, 40.0, "SLIDE & SHOOT", COL_YELLOW);
            centered(&mut cmds, 64.0, "[F] TO START", COL_WHITE);
            if session.high_score > 0 {
                centered(&mut cmds, 80.0, &format!("BEST {}", session.high_score), COL_GREY);
            }
        }
        Phase::Ready => {
            centered(&mut cmds, 96.0, "HOLD [F] TO SLIDE", COL_WHITE);
        }
        Phase::Fail { failed_at } => {
            let elapsed = frame.saturating_sub(failed_at);
            let r = 2.0 + (elapsed % 8) as f32 / 2.0;
            let color = if elapsed % 4 < 2 { COL_RED } else { COL_ORANGE };
            cmds.push(DrawCommand::Circle {
                x: RIGHT_BOUNDARY,
                y: PLAYER_Y + PLAYER_HALF_WIDTH,
                r,
                color,
            });
        }
        Phase::Clear { bonus } => {
            if session.stage >= STAGES_MAX {
                centered(&mut cmds, 56.0, "ALL STAGES CLEAR!", COL_GREEN);
            } else {
                centered(&mut cmds, 56.0, "STAGE CLEAR!", COL_GREEN);
            }
            centered(&mut cmds, 66.0, &format!("BONUS +{}", bonus), COL_YELLOW);
        }
        Phase::GameOver => {
            centered(&mut cmds, 60.0, "GAME OVER", COL_RED);
        }
        Phase::Moving | Phase::Stop { .. } | Phase::Fire { .. } => {}
    }

    cmds
}

fn draw_hud(cmds: &mut Vec<DrawCommand>, session: &Session) {
    if session.phase == Phase::Title {
        return;
    }
    cmds.push(DrawCommand::Text {
        x: 1.0,
        y: 1.0,
        text: format!("SCORE {}", session.score),
        color: COL_WHITE,
        align: Align::Left,
    });
    cmds.push(DrawCommand::Text {
        x: 56.0,
        y: 1.0,
        text: format!("STAGE {}", session.stage),
        color: COL_WHITE,
        align: Align::Left,
    });
    cmds.push(DrawCommand::Text {
        x: 96.0,
        y: 1.0,
        text: format!("{}/{}", session.shots_used, session.shots_allowed),
        color: COL_WHITE,
        align: Align::Left,
    });
}

/// "N COMBO" above the play area, fading out after the latest hit.
fn draw_combo(cmds: &mut Vec<DrawCommand>, session: &Session) {
    let Some(started) = session.combo_display_started_at else {
        return;
    };
    let elapsed = session.frame.saturating_sub(started);
    if session.combo < 2 || elapsed >= COMBO_DISPLAY_FRAMES {
        return;
    }
    let color = match elapsed * 3 / COMBO_DISPLAY_FRAMES {
        0 => COL_WHITE,
        1 => COL_SILVER,
        _ => COL_NAVY,
    };
    centered(cmds, 100.0, &format!("{} COMBO", session.combo), color);
}

fn centered(cmds: &mut Vec<DrawCommand>, y: f32, text: &str, color: u8) {
    cmds.push(DrawCommand::Text {
        x: SCREEN_SIZE / 2.0,
        y,
        text: text.to_string(),
        color,
        align: Align::Center,
    });
}
