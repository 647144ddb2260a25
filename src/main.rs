//! Duel Arena - Entry Point
//!
//! Human (arrow keys + space) against the AI in the terminal. Logs go to a
//! file so they do not tear the TUI.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use duel_arena::core::config::DuelConfig;
use duel_arena::core::error::Result;
use duel_arena::core::types::Slot;
use duel_arena::render::{FrameDriver, SpriteLibrary};
use duel_arena::simulation::DuelSimulation;
use duel_arena::ui::{KeyboardInput, Scene, TerminalAudio, TerminalPresentation, TerminalSession};

/// ~60 ticks per second
const FRAME_TIME: Duration = Duration::from_micros(16_667);

#[derive(Parser, Debug)]
#[command(name = "duel-arena")]
#[command(about = "Two-fighter duel against a scripted AI, in the terminal")]
struct Args {
    /// TOML config; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for the AI and attack rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Sprite sheet root (`<root>/<character>/Sprites/*.png`); only sheets
    /// found there are drawn. Without it every fighter draws as a box.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Outline body and strike boxes
    #[arg(long)]
    hitboxes: bool,

    /// Log file
    #[arg(long, default_value = "duel-arena.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duel_arena=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let mut config = match &args.config {
        Some(path) => DuelConfig::load(path)?,
        None => DuelConfig::default(),
    };
    if args.hitboxes {
        config.render.show_hitboxes = true;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "Duel Arena starting...");

    let mut sim = DuelSimulation::human_vs_ai(config.clone(), seed)?;
    let characters = sim.characters();

    let sprites = match &args.assets {
        Some(root) => {
            let mut library = SpriteLibrary::new(characters, root);
            let found = library.probe();
            tracing::info!(root = %root.display(), found, "sprite sheets probed");
            library
        }
        None => SpriteLibrary::placeholder(characters),
    };
    let mut driver = FrameDriver::new(sprites, &config.render);

    let (session, terminal) = TerminalSession::enter()?;
    let names = characters.map(|c| c.display_name().to_string());
    let mut screen = TerminalPresentation::new(terminal, Scene::new(names));
    let mut input = KeyboardInput::new(session.reports_release());
    let mut audio = TerminalAudio::new(config.render.volume);

    driver.sync(&sim, &mut screen);

    let mut last = Instant::now();
    loop {
        let deadline = last + FRAME_TIME;
        input.poll(deadline.saturating_duration_since(Instant::now()))?;
        if input.quit_requested() {
            break;
        }

        let now = Instant::now();
        if now < deadline {
            continue;
        }
        let dt = now - last;
        last = now;

        screen.scene_mut().status = audio.status();
        let events = driver.frame(&mut sim, &input, dt, &mut screen, &mut audio)?;
        screen.scene_mut().record(&events);
    }

    drop(session);

    let scores = sim.round().scores();
    tracing::info!(
        ticks = sim.tick(),
        p1 = scores.get(Slot::P1),
        p2 = scores.get(Slot::P2),
        skipped_draws = driver.skipped_draws(),
        "Duel Arena exiting"
    );
    println!(
        "{} {} - {} {}",
        characters[0].display_name(),
        scores.get(Slot::P1),
        scores.get(Slot::P2),
        characters[1].display_name()
    );
    Ok(())
}
