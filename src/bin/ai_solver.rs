use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tendrops_solver::engine::{Board, MAX_MOVES};
use tendrops_solver::error::SolverError;
use tendrops_solver::solver::{
    solve, SearchConfig, DEFAULT_EVICTION_MARGIN, DEFAULT_EXHAUSTIVE_THRESHOLD,
    DEFAULT_QUEUE_CAPACITY,
};
use tendrops_solver::utils::{
    append_board_record, append_solution_record, board_from_str, format_solution,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file (drops in hand, then six rows of six digits).
    /// Reads standard input when omitted.
    board_file: Option<PathBuf>,

    /// File the initial board and the result are appended to
    #[clap(long, default_value = "record.txt")]
    record: PathBuf,

    /// Do not write the record file
    #[clap(long)]
    no_record: bool,

    /// Maximum number of boards held by the best-first queue
    #[clap(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,

    /// Distance from capacity at which the queue drops its worst half
    #[clap(long, default_value_t = DEFAULT_EVICTION_MARGIN)]
    eviction_margin: usize,

    /// On-board count at or below which the exhaustive search takes over
    #[clap(long, default_value_t = DEFAULT_EXHAUSTIVE_THRESHOLD)]
    exhaustive_threshold: u32,

    /// Longest move sequence to consider
    #[clap(long, default_value_t = MAX_MOVES)]
    max_moves: usize,

    /// Print the board after every move of the solution
    #[clap(long)]
    replay: bool,

    /// Log search progress at debug level
    #[clap(short, long)]
    verbose: bool,
}

fn read_board(path: Option<&PathBuf>) -> Result<Board, SolverError> {
    let content = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(board_from_str(&content)?)
}

fn run(args: &Args) -> Result<(), SolverError> {
    let board = read_board(args.board_file.as_ref())?;
    println!("Initial board state:\n{}\n", board);

    if !args.no_record {
        append_board_record(&args.record, &board)?;
    }

    let config = SearchConfig {
        queue_capacity: args.queue_capacity,
        eviction_margin: args.eviction_margin,
        exhaustive_threshold: args.exhaustive_threshold,
        max_moves: args.max_moves,
    };
    let outcome = solve(&board, config);

    println!("End of computation.");
    println!("{}", format_solution(&outcome));
    println!(
        "Queue evictions: {} ({} boards dropped)",
        outcome.stats.eviction_passes, outcome.stats.evicted_nodes
    );

    if args.replay {
        if let Some(solution) = &outcome.solution {
            for (i, (cell, after)) in solution
                .moves
                .iter()
                .zip(solution.replay(&board))
                .enumerate()
            {
                println!("\nMove {}:\n{}", i + 1, after.to_string_with_highlight(Some(*cell)));
            }
        }
    }

    if !args.no_record {
        append_solution_record(&args.record, &outcome)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
