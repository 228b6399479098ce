use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::style::Stylize;
use rand::{rngs::StdRng, SeedableRng};
use slider_puzzle::benchmark::run_benchmarks;
use slider_puzzle::{solve, Board, SolverConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board width used when generating a random board
    #[clap(short, long, default_value_t = 4)]
    size: usize,

    /// Seed for the random board
    #[clap(long)]
    seed: Option<u64>,

    /// Explicit start board, e.g. "1,2,3,4,5,6,7,_,8"
    #[clap(short, long)]
    board: Option<String>,

    /// Path to a solver config TOML file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Overrides max_steps from the config
    #[clap(long)]
    max_steps: Option<u32>,

    /// Compare all heuristics instead of solving once
    #[clap(long)]
    benchmark: bool,
}

fn start_board(args: &Args) -> anyhow::Result<Board> {
    if let Some(text) = &args.board {
        let board: Board = text.parse().context("Invalid --board")?;
        if !board.is_solvable() {
            tracing::warn!("Start board is not solvable; the search will exhaust its budget");
        }
        return Ok(board);
    }
    let board = match args.seed {
        Some(seed) => Board::random(args.size, &mut StdRng::seed_from_u64(seed)),
        None => Board::shuffled(args.size),
    };
    board.context("Invalid --size")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    if let Some(max_steps) = args.max_steps {
        config.max_steps = max_steps;
    }
    config.validate();

    let board = start_board(&args)?;
    println!("Start board:\n{}", board);

    if args.benchmark {
        for row in run_benchmarks(&board, config.max_steps) {
            let line = row.to_string();
            if row.solved {
                println!("{}", line.green());
            } else {
                println!("{}", line.red());
            }
        }
        return Ok(());
    }

    let started = Instant::now();
    let solution = solve(&board, &config);
    let elapsed = started.elapsed();

    let Some(moves) = solution else {
        println!(
            "{}",
            format!("No solution within {} steps ({:.1?})", config.max_steps, elapsed).red()
        );
        return Ok(());
    };

    println!(
        "{}",
        format!("Found solution with {} moves in {:.1?}", moves.len(), elapsed)
            .green()
            .bold()
    );

    let boards = board
        .replay(&moves)
        .context("Solver returned a move that leaves the grid")?;
    for (movement, step) in moves.iter().zip(boards.iter().skip(1)) {
        println!("{}\n{}", movement.to_string().bold(), step);
    }
    Ok(())
}
