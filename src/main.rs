use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info, warn};
use rand::thread_rng;

use slide_and_shoot::audio::AudioManager;
use slide_and_shoot::compute::{drain_events, init_session, step};
use slide_and_shoot::config::{load_config, validate_fps, GameConfig};
use slide_and_shoot::display::{Canvas, Starfield};
use slide_and_shoot::draw::render;
use slide_and_shoot::highscore::{default_high_score_path, load_high_score, save_high_score};
use slide_and_shoot::input::InputTracker;
use slide_and_shoot::{GameResult, Session};

const STAR_COUNT: usize = 48;

#[derive(Parser, Debug)]
#[command(name = "slide_and_shoot", about = "Slide, stop, fire: clear every stage")]
struct Args {
    /// TOML config file (default: ./slide_and_shoot.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the configured frame rate
    #[arg(long)]
    fps: Option<u32>,
    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,
}

fn init_logging(config: &GameConfig) -> GameResult<()> {
    // The terminal is in raw alternate-screen mode, so a log file is the
    // only place info-level output stays readable.
    let default_level = if config.log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if let Some(path) = &config.log_file {
        let file = std::fs::File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    let _ = builder.try_init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One `step` then one draw per frame until quit is pressed.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> GameResult<()> {
    let frame_time: Duration = config.frame_duration();
    let mut tracker = InputTracker::new(config.hold_window_frames());
    let mut audio = AudioManager::new(config.bell, config.muted);
    let starfield = Starfield::new(&mut thread_rng(), STAR_COUNT);
    let mut frame: u64 = session.frame;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            tracker.handle_event(&ev, frame);
        }
        let input = tracker.snapshot(frame);
        if input.quit_pressed {
            info!("quit at frame {}", frame);
            return Ok(());
        }

        step(session, &input, frame);

        let events = drain_events(session);
        audio.handle(out, &events)?;

        let (cols, rows) = terminal::size()?;
        let mut canvas = Canvas::for_terminal(cols, rows);
        canvas.draw(&render(session), Some(&starfield));
        canvas.present(out, cols)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> GameResult<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(fps) = args.fps {
        validate_fps(fps)?;
        config.fps = fps;
    }
    if args.mute {
        config.muted = true;
    }
    init_logging(&config)?;
    info!(
        "starting at {} fps, hold window {} frames",
        config.fps,
        config.hold_window_frames()
    );

    let score_path = config
        .high_score_file
        .clone()
        .unwrap_or_else(default_high_score_path);
    let mut session = init_session(load_high_score(&score_path));

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal does not report key releases; using hold window");
    }

    // Dedicate a thread to blocking event reads so the game loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut session, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if session.high_score > load_high_score(&score_path) {
        if let Err(e) = save_high_score(&score_path, session.high_score) {
            error!("could not save best score: {}", e);
        }
    }

    result
}
