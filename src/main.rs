mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::rc::Rc;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::filter::EnvFilter;

use alien_invasion::assets::{asset_dir_override, ExplosionSheet};
use alien_invasion::audio::{open_output, Audio, SoundBank};
use alien_invasion::compute::{handle_input, init_state, resume_if_due, tick, Flow, Input};
use alien_invasion::entities::{GameState, PauseKind};
use alien_invasion::error::GameError;
use alien_invasion::input::{translate_event, HeldKeys};
use alien_invasion::settings::Settings;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

const LOG_FILE: &str = "alien_invasion.log";

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// While a pause is pending nothing is read from `rx`: input typed during
/// the pause waits in the channel and is handled once it ends.  The screen
/// keeps its last frame during a respawn pause; the frame that starts a
/// game-over pause carries the overlay.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    audio: &mut impl Audio,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    let mut held = HeldKeys::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();

        if resume_if_due(state, frame_start) {
            thread::sleep(FRAME);
            continue;
        }
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Some(input) = translate_event(ev, frame, &mut held) else {
                continue;
            };
            if handle_input(state, input) == Flow::Quit {
                return Ok(());
            }
        }

        // ── Release stale direction keys (no release events available) ────────
        if !keyboard_enhanced {
            for key in held.expire(frame) {
                handle_input(state, Input::KeyUp(key));
            }
        }

        tick(state, frame_start, audio);

        let respawning = matches!(state.pause, Some(p) if p.kind == PauseKind::Respawn);
        if !respawning {
            display::render(out, state)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Logs go to a file: stdout is the game screen.  Nothing is installed
/// unless `RUST_LOG` is set.
fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let file = match File::create(LOG_FILE) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("logging disabled, cannot create {LOG_FILE}: {err}");
            return;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> Result<(), GameError> {
    init_logging();

    // Missing assets abort before the terminal is touched.
    let (sheet, sounds) = match asset_dir_override() {
        Some(dir) => (ExplosionSheet::load(&dir)?, SoundBank::load(&dir)?),
        None => (ExplosionSheet::bundled()?, SoundBank::bundled()?),
    };
    let mut audio = open_output(sounds);
    let settings = Settings::default();

    let (cols, rows) = terminal::size()?;
    let need_cols = settings.screen_width.max(0) as u16;
    let need_rows = settings.screen_height.max(0) as u16;
    if cols < need_cols || rows < need_rows {
        return Err(GameError::TerminalTooSmall {
            cols,
            rows,
            need_cols,
            need_rows,
        });
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    tracing::info!(keyboard_enhanced, cols, rows, "terminal ready");

    // Blocking reads happen on their own thread; the loop only polls rx.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let mut state = init_state(settings, Rc::new(sheet));
    let result = game_loop(&mut out, &mut state, &rx, &mut audio, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    tracing::info!(high_score = state.stats.high_score, "quit");
    result.map_err(GameError::from)
}
