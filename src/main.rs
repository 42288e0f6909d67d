use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use grid_2048::config::{Difficulty, GameConfig};
use grid_2048::engine::Direction;
use grid_2048::game::{Game, GameState};
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Parser)]
#[command(name = "grid-2048", about = "Play 2048 in the terminal, one command per token on stdin")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed the tile RNG for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Spawn policy preset (hard or classic); overrides the config file
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Emit one JSON state object per turn instead of drawing the board
    #[arg(long)]
    json: bool,
}

enum Command {
    Move(Direction),
    Reset,
    Quit,
}

fn parse_command(token: &str) -> Result<Command, grid_2048::error::EngineError> {
    match token.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "r" | "reset" | "retry" => Ok(Command::Reset),
        _ => token.parse().map(Command::Move),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => GameConfig::from_toml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(difficulty) = args.difficulty {
        if cfg.new_tile_distribution.take().is_some() {
            warn!("--difficulty overrides new_tile_distribution from the config file");
        }
        cfg.difficulty = difficulty;
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::from_config(&cfg, rng)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &game.state(), args.json)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        for token in line.split_whitespace() {
            match parse_command(token) {
                Ok(Command::Quit) => return Ok(()),
                Ok(Command::Reset) => {
                    let state = game.reset();
                    render(&mut out, &state, args.json)?;
                }
                Ok(Command::Move(dir)) => {
                    let outcome = game.play(dir);
                    if outcome.moved {
                        render(&mut out, &outcome.state, args.json)?;
                    }
                }
                Err(e) => eprintln!("{e}"),
            }
        }
    }
    Ok(())
}

fn render<W: Write>(out: &mut W, state: &GameState, json: bool) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(state)?)?;
    } else {
        write!(out, "{}", state.board)?;
        writeln!(out, "Score: {}", state.score)?;
        if state.is_over {
            writeln!(out, "Game over! Final score: {}. Enter r to retry or q to quit.", state.score)?;
        }
    }
    out.flush()?;
    Ok(())
}
