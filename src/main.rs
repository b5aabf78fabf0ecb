use std::time::Instant;

use backgammon::simulation::{BLACK_NAME, SimulationConfig, WHITE_NAME, simulate};
use clap::Parser;

/// Plays the greedy AI against itself and reports how the games went.
#[derive(Parser, Debug)]
#[command(name = "backgammon")]
struct Args {
    /// Number of games to play.
    #[arg(long, default_value_t = 100)]
    games: u32,

    /// Base RNG seed (game i uses seed + i).
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Start every game from a random layout instead of the standard one.
    #[arg(long)]
    random_layout: bool,

    /// Abandon a game after this many turns.
    #[arg(long, default_value_t = 2_000)]
    max_turns: u32,

    /// Worker threads; 0 lets rayon decide.
    #[arg(long, default_value_t = 0)]
    threads: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new().num_threads(args.threads).build_global()?;
    }

    let config = SimulationConfig {
        games: args.games,
        seed: args.seed,
        random_layout: args.random_layout,
        max_turns: args.max_turns,
    };

    let start = Instant::now();
    let summary = simulate(&config)?;
    let duration = start.elapsed();

    let rate = |wins: u32| 100.0 * wins as f64 / summary.games.max(1) as f64;
    println!("============================================");
    println!("Games: {}, finished in {:?}", summary.games, duration);
    println!("{}: {} wins ({:.2}%)", WHITE_NAME, summary.wins_of(WHITE_NAME), rate(summary.wins_of(WHITE_NAME)));
    println!("{}: {} wins ({:.2}%)", BLACK_NAME, summary.wins_of(BLACK_NAME), rate(summary.wins_of(BLACK_NAME)));
    println!("Unfinished: {}, average turns: {:.1}", summary.unfinished, summary.average_turns());
    println!("============================================");
    Ok(())
}
