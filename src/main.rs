use std::{process::ExitCode, time::Instant};

use clap::{Parser, ValueEnum};
use crossword_layout::{Engine, LogProgress, Parameters, Unanchored, WordList};
use env_logger::Env;
use log::info;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum EngineArg {
    BruteForce,
    Permutation,
    Backtrack,
}

impl From<EngineArg> for Engine {
    fn from(engine: EngineArg) -> Self {
        match engine {
            EngineArg::BruteForce => Engine::BruteForce,
            EngineArg::Permutation => Engine::Permutation,
            EngineArg::Backtrack => Engine::Backtrack,
        }
    }
}

/// Arranges words into a crossword grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Words to arrange
    #[arg(required = true)]
    words: Vec<String>,

    /// Minimum number of crossing cells a layout needs
    #[arg(short = 'c', long, default_value_t = 1)]
    min_crossings: usize,

    /// Maximum number of layouts to return
    #[arg(short = 'n', long, default_value_t = 1)]
    max_solutions: usize,

    #[arg(short, long, value_enum, default_value_t = EngineArg::Backtrack)]
    engine: EngineArg,

    /// Stop after this many iterations
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Retry words that could not be anchored once the others are placed
    /// (permutation engine)
    #[arg(long)]
    defer_unanchored: bool,

    /// Spread the search over all cores
    #[arg(short, long)]
    parallel: bool,

    /// Shuffle the start words of the backtracking engine
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn parameters(&self) -> Parameters {
        let mut params = Parameters::new(self.min_crossings, self.max_solutions)
            .with_parallel(self.parallel)
            .with_unanchored(if self.defer_unanchored {
                Unanchored::Defer
            } else {
                Unanchored::Discard
            });
        if let Some(max_iterations) = self.max_iterations {
            params = params.with_max_iterations(max_iterations);
        }
        if let Some(seed) = self.seed {
            params = params.with_seed(seed);
        }
        params
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let words = match WordList::new(&cli.words) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let engine = Engine::from(cli.engine);
    let progress = match engine {
        Engine::Backtrack => LogProgress::new(None).every(100_000),
        _ => LogProgress::new(engine.variant_count(&words)),
    };

    let start = Instant::now();
    let solutions = engine.find_layouts(&words, &cli.parameters(), &progress);
    let elapsed = start.elapsed();

    for layout in &solutions {
        println!("Next Puzzle ({} crosses):", layout.crossing_count());
        println!("{layout}");
    }
    println!("Found {} puzzles", solutions.len());
    info!("Elapsed time: {:?}", elapsed);

    ExitCode::SUCCESS
}
