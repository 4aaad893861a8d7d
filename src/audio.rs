//! Audio for a terminal: the bell for the big moments, a log line for
//! everything else.  No samples, no mixing.

use std::io::Write;

use log::debug;

use crate::entities::{GameEvent, SoundEffect};

const BELL: &str = "\x07";

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    bell: bool,
    muted: bool,
    music_playing: bool,
}

impl AudioManager {
    pub fn new(bell: bool, muted: bool) -> Self {
        AudioManager {
            bell,
            muted,
            music_playing: false,
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Whether an effect is loud enough to ring the bell.
    fn rings(effect: SoundEffect) -> bool {
        matches!(
            effect,
            SoundEffect::Hit | SoundEffect::Fail | SoundEffect::Success | SoundEffect::Failure
        )
    }

    /// Play every queued event; returns how many bells were rung.
    pub fn handle<W: Write>(&mut self, out: &mut W, events: &[GameEvent]) -> std::io::Result<usize> {
        let mut rung = 0;
        for event in events {
            match *event {
                GameEvent::MusicStart => {
                    self.music_playing = true;
                    debug!("music: start");
                }
                GameEvent::MusicStop => {
                    self.music_playing = false;
                    debug!("music: stop");
                }
                GameEvent::Sound(effect) => {
                    debug!("sound: {:?}", effect);
                    // One bell per frame is all a terminal can express.
                    if self.bell && !self.muted && rung == 0 && Self::rings(effect) {
                        out.write_all(BELL.as_bytes())?;
                        rung += 1;
                    }
                }
            }
        }
        if rung > 0 {
            out.flush()?;
        }
        Ok(rung)
    }
}
