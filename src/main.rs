use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use log::{debug, error, info};

use particle_arcade::display::TerminalSurface;
use particle_arcade::input::Key;
use particle_arcade::scenes::Director;
use particle_arcade::{GameConfig, GameLoop, GameState};

/// Frames a press or repeat event keeps its key held. Terminals without
/// release events rely on OS key repeat (at least 15 Hz) to refresh it.
const HOLD_WINDOW: u64 = 8;

/// Whether `key` had a press or repeat within `HOLD_WINDOW` frames of `frame`.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Terminal keys bound to each logical key.
fn bindings(key: Key) -> &'static [KeyCode] {
    match key {
        Key::Up => &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
        Key::Down => &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
        Key::Left => &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
        Key::Right => &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
        Key::Fire => &[KeyCode::Char(' '), KeyCode::Char('z'), KeyCode::Char('Z')],
        Key::Confirm => &[KeyCode::Enter],
        Key::Quit => &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc],
    }
}

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".particle_arcade_score")
}

fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(score: u32) {
    if let Err(e) = std::fs::write(high_score_path(), score.to_string()) {
        error!("failed to save high score: {}", e);
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is taken over by the game, so log lines go to a file.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Ok(file) = File::create("particle_arcade.log") {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    let _ = builder.try_init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Scheduler for the core loop: drains input, ticks once per frame and
/// sleeps out the rest of the frame.
///
/// Input model: `key_frame` records the frame number of the last
/// press/repeat event for every key, and each frame the logical keys whose
/// bindings are still "fresh" are handed to the game as held.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> std::io::Result<()> {
    let seed = config.seed.unwrap_or_else(rand::random);
    info!("starting with seed {}", seed);

    let mut state = GameState::new(config.canvas_size(), seed);
    state.high_score = load_high_score();
    let mut saved_high_score = state.high_score;

    let mut driver = GameLoop::new(state);
    let mut director = Director::new(config.clone());
    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(cols, rows, config.canvas_size());

    let frame_time = config.frame_duration();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // drain input without blocking
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                            driver.stop();
                        }
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(w, h) => surface.resize(w, h),
                _ => {}
            }
        }

        let held: Vec<Key> = Key::ALL
            .into_iter()
            .filter(|&k| bindings(k).iter().any(|code| is_held(&key_frame, code, frame)))
            .collect();
        if held.contains(&Key::Quit) {
            driver.stop();
        }
        driver.state_mut().input.set_held(held);

        if let Err(e) = director.sync(&mut driver) {
            error!("failed to build scene: {}", e);
            driver.stop();
        }

        if !driver.tick(&mut surface) {
            break;
        }

        for sound in driver.state_mut().drain_sounds() {
            debug!("play sound {}", sound);
        }

        surface.present(out)?;

        // Persist new high score if beaten
        let high_score = driver.state().high_score;
        if high_score > saved_high_score {
            saved_high_score = high_score;
            save_high_score(high_score);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => GameConfig::default(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release and repeat events; only kitty-protocol terminals honour it.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // blocking event reads live on their own thread
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &config);

    // restore the terminal even when the loop failed
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
