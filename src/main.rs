//! Terminal front end.
//!
//! Builds a board from defaults, an optional JSON config file and CLI flags,
//! then plays it out on stdin/stdout.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use slide_grid::config::GameConfig;
use slide_grid::game::game_loop::{AiController, HumanController, run_game};
use slide_grid::game::systems::{populate, seeded_rng};

#[derive(Parser)]
#[command(name = "slide-grid")]
#[command(about = "Slide penguins across the ice and collect the heaviest haul")]
struct Args {
    /// Board seed; a random one is drawn and logged when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds
    #[arg(long)]
    rounds: Option<u32>,

    /// Let the computer play every actor
    #[arg(long)]
    auto: bool,

    /// JSON config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final board as JSON after the scoreboard
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GameConfig::from_json_str(&text)
                .with_context(|| format!("invalid config in {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if args.auto {
        config.human_player = false;
    }
    config.validate().context("invalid settings")?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut config = load_config(&args)?;

    let (seed, mut rng) = seeded_rng(config.seed);
    config.seed = Some(seed);
    info!("[Main] seed={} rounds={} human={}", seed, config.rounds, config.human_player);

    let mut game_state = populate(&config, &mut rng).context("failed to set up the board")?;
    if let Some(player) = game_state.player_actor() {
        info!("[Main] player={} kind={:?}", player.id, player.kind);
    }

    // Computer decisions use their own stream, derived from the board seed.
    let mut computer = AiController::new(Pcg32::seed_from_u64(seed ^ 0x5EED), config.ai_special_chance);
    let stdin = io::stdin();
    let mut human = HumanController::new(stdin.lock(), io::stdout());
    let mut out = io::stdout();

    run_game(&mut game_state, &mut human, &mut computer, config.rounds, &mut out)?;

    if args.json {
        let json = serde_json::to_string_pretty(&game_state).context("failed to serialize the board")?;
        writeln!(out, "{json}")?;
    }
    Ok(())
}
