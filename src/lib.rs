//! Slide & Shoot, a single-screen arcade game.
//!
//! Core modules:
//! - `entities`: pure data (session, targets, phases, events)
//! - `compute`: per-frame phase machine and target rules
//! - `stages`: static stage table
//! - `draw`: pure translation of a session into draw commands
//! - `display`: terminal rasteriser for draw commands
//! - `input`, `audio`, `config`, `highscore`, `error`: driver plumbing

pub mod audio;
pub mod compute;
pub mod config;
pub mod constants;
pub mod display;
pub mod draw;
pub mod entities;
pub mod error;
pub mod highscore;
pub mod input;
pub mod stages;

pub use compute::step;
pub use draw::render;
pub use entities::{InputSnapshot, Phase, Session};
pub use error::{GameError, GameResult};
