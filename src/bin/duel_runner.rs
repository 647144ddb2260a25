//! Headless Duel Runner
//!
//! Plays AI vs AI rounds without a display and prints a JSON summary. P1 keeps
//! the human cooldown tuning so the difficulty asymmetry stays in play.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use duel_arena::ai::AiController;
use duel_arena::core::config::DuelConfig;
use duel_arena::core::error::Result;
use duel_arena::core::types::{CharacterKind, ControllerKind, Slot};
use duel_arena::input::ActionSet;
use duel_arena::round::RoundOutcome;
use duel_arena::simulation::{DuelEventType, DuelSimulation};

/// Headless Duel Runner - AI vs AI rounds for balance checks
#[derive(Parser, Debug)]
#[command(name = "duel_runner")]
#[command(about = "Run AI vs AI duel rounds and output results as JSON")]
struct Args {
    /// Number of rounds to play
    #[arg(long, default_value_t = 10)]
    rounds: u32,

    /// Maximum ticks per round before it counts as a draw
    #[arg(long, default_value_t = 5400)]
    max_ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every tick's events to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct RoundRecord {
    round: u32,
    /// "p1", "p2", "draw" or "timeout"
    outcome: String,
    ticks: u64,
    p1_health: u8,
    p2_health: u8,
}

/// JSON output structure
#[derive(Serialize)]
struct MatchResult {
    rounds: u32,
    p1_wins: u32,
    p2_wins: u32,
    draws: u32,
    timeouts: u32,
    ticks_per_round: Vec<u64>,
    records: Vec<RoundRecord>,
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duel_arena=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = match &args.config {
        Some(path) => DuelConfig::load(path)?,
        None => DuelConfig::default(),
    };

    let p1 = AiController::new(config.ai_policy.clone(), seed).driving(ControllerKind::Human);
    let p2 = AiController::new(config.ai_policy.clone(), seed.wrapping_add(1));
    let mut duel = DuelSimulation::new(
        config,
        [CharacterKind::Swordsman, CharacterKind::Demon],
        [Box::new(p1), Box::new(p2)],
    )?;

    let dt = Duration::from_secs_f64(1.0 / 60.0);
    let no_keys = ActionSet::empty();
    let mut records = Vec::with_capacity(args.rounds as usize);
    let mut timeouts = 0;

    for _ in 0..args.rounds {
        let round = duel.round().round_number();
        let start = duel.tick();
        let mut outcome = None;

        while duel.tick() - start < args.max_ticks {
            let events = duel.run_tick(&no_keys, dt);
            if args.verbose {
                for event in &events.events {
                    eprintln!("  [{}] {:?}", event.tick, event.event_type);
                }
            }
            outcome = events.iter().find_map(|e| match e {
                DuelEventType::RoundOver { outcome } => Some(*outcome),
                _ => None,
            });
            if outcome.is_some() {
                break;
            }
        }

        let label = match outcome {
            Some(RoundOutcome::Winner(Slot::P1)) => "p1",
            Some(RoundOutcome::Winner(Slot::P2)) => "p2",
            Some(RoundOutcome::Draw) => "draw",
            None => {
                timeouts += 1;
                "timeout"
            }
        };
        records.push(RoundRecord {
            round,
            outcome: label.to_string(),
            ticks: duel.tick() - start,
            p1_health: duel.fighter(Slot::P1).health,
            p2_health: duel.fighter(Slot::P2).health,
        });
        tracing::info!(round, outcome = label, ticks = duel.tick() - start, "round finished");

        duel.start_next_round();
    }

    let scores = duel.round().scores();
    let result = MatchResult {
        rounds: args.rounds,
        p1_wins: scores.get(Slot::P1),
        p2_wins: scores.get(Slot::P2),
        draws: args.rounds - scores.total(),
        timeouts,
        ticks_per_round: records.iter().map(|r| r.ticks).collect(),
        records,
        seed,
    };

    match args.format.as_str() {
        "text" => {
            println!("Duel Result");
            println!("===========");
            println!("Rounds: {}", result.rounds);
            println!("P1 wins: {}", result.p1_wins);
            println!("P2 wins: {}", result.p2_wins);
            println!("Draws: {} ({} timeouts)", result.draws, result.timeouts);
            println!("Seed: {}", result.seed);
        }
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
