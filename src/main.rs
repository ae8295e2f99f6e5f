//! Terminal Higher or Lower (default binary).
//!
//! Loads configuration, sets up file logging (the terminal is in raw mode,
//! so nothing may print to it), starts a session and runs the key-driven
//! event loop.

use std::cell::Cell;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use higher_lower::adapter::{
    AudioSink, Config, GameSession, JsonFileStore, KeyValueStore, MemoryStore, SilentAudio,
};
use higher_lower::input::{handle_key_event, should_quit};
use higher_lower::term::{FrameBuffer, GameView, Screen, TerminalRenderer, Viewport};
use higher_lower::types::{Action, Phase};

type Session = GameSession<Box<dyn KeyValueStore>, Box<dyn AudioSink>>;

#[derive(Parser, Debug)]
#[command(name = "higher-lower", version, about = "Guess which search term gets more monthly searches")]
struct Cli {
    /// Config file (default: <config dir>/higher-lower/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON catalogue to play with instead of the bundled one
    #[arg(long)]
    catalogue: Option<PathBuf>,

    /// Directory for the high score, log file and sounds
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Fixed RNG seed
    #[arg(long)]
    seed: Option<u32>,

    /// Disable sound effects
    #[arg(long)]
    no_sound: bool,

    /// Keep the high score in memory only
    #[arg(long)]
    ephemeral: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config)?;

    let mut session = GameSession::new(open_store(&cli, &config), open_audio(&config), config.seed_or_clock());
    session
        .start_session(&config.catalogue_source())
        .context("no playable catalogue (see the log file for details)")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exiting");
    result
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(path) = &cli.catalogue {
        config.catalogue = Some(path.clone());
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.no_sound {
        config.sound.enabled = false;
    }
    Ok(config)
}

fn init_logging(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating data dir {}", config.data_dir.display()))?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn open_store(cli: &Cli, config: &Config) -> Box<dyn KeyValueStore> {
    if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(JsonFileStore::in_dir(&config.data_dir))
    }
}

#[cfg(feature = "sound")]
fn open_audio(config: &Config) -> Box<dyn AudioSink> {
    if config.sound.enabled {
        Box::new(higher_lower::adapter::RodioAudio::new(
            config.sounds_dir(),
            config.sound.volume,
        ))
    } else {
        Box::new(SilentAudio)
    }
}

#[cfg(not(feature = "sound"))]
fn open_audio(config: &Config) -> Box<dyn AudioSink> {
    if config.sound.enabled {
        tracing::warn!("built without the `sound` feature, playing silently");
    }
    Box::new(SilentAudio)
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut screen = Screen::Home;

    let dirty = Rc::new(Cell::new(true));
    let flag = Rc::clone(&dirty);
    session.subscribe(move |_| flag.set(true));

    loop {
        if dirty.replace(false) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(screen, &session.snapshot(), Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    let next = navigate(screen, action, session);
                    if next != screen {
                        screen = next;
                        dirty.set(true);
                    }
                }
            }
            Event::Resize(_, _) => {
                term.invalidate();
                dirty.set(true);
            }
            _ => {}
        }
    }
}

/// Apply `action` on `screen`; returns the screen to show next.
fn navigate(screen: Screen, action: Action, session: &mut Session) -> Screen {
    match (screen, action) {
        (Screen::Home, Action::Confirm) => {
            session.reset_session();
            Screen::Game
        }
        (Screen::Home, Action::HowToPlay) => Screen::HowToPlay,
        (Screen::HowToPlay, Action::Back | Action::Confirm) => Screen::Home,
        (Screen::Game, Action::Guess(guess)) => {
            session.submit_guess(guess);
            Screen::Game
        }
        (Screen::Game, Action::Confirm) if session.phase() == Phase::GameOver => {
            session.reset_session();
            Screen::Game
        }
        (Screen::Game, Action::Back) => Screen::Home,
        (screen, _) => screen,
    }
}
