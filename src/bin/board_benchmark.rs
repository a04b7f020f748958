use clap::Parser;
use std::time::Instant;
use tendrops_solver::engine::Board;
use tendrops_solver::solver::{solve, SearchConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Runs the solver over seeded random boards", long_about = None)]
struct Args {
    /// Number of random boards to solve
    #[clap(short, long, default_value_t = 10)]
    boards: u64,

    /// Seed of the first board; board `i` uses `seed + i`
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Drops in hand on every board
    #[clap(long, default_value_t = 10)]
    supply: u32,

    /// Best-first queue capacity
    #[clap(long, default_value_t = 50_000)]
    queue_capacity: usize,

    /// On-board count at or below which the exhaustive search takes over
    #[clap(long, default_value_t = 11)]
    exhaustive_threshold: u32,
}

fn main() {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("Solving {} random boards with {} drops each...", args.boards, args.supply);

    let mut solved = 0u64;
    let mut total_drops = 0u64;
    let mut total_evicted = 0u64;
    let started = Instant::now();

    for i in 0..args.boards {
        let seed = args.seed + i;
        let board = Board::new_random_with_seed(seed, args.supply);
        let config = SearchConfig {
            queue_capacity: args.queue_capacity,
            exhaustive_threshold: args.exhaustive_threshold,
            ..SearchConfig::default()
        };

        let board_started = Instant::now();
        let outcome = solve(&board, config);
        let elapsed = board_started.elapsed();

        match &outcome.solution {
            Some(solution) => {
                solved += 1;
                total_drops += u64::from(solution.supply);
                println!(
                    "  Seed: {:<6} Drops: {:<4} Moves: {:<4} DFS: {:<10} BFS: {:<10} Time: {:.2?}",
                    seed,
                    solution.supply,
                    solution.moves.len(),
                    outcome.stats.dfs_expansions,
                    outcome.stats.bfs_expansions,
                    elapsed
                );
            }
            None => println!(
                "  Seed: {:<6} no clear found (DFS: {}, BFS: {}) Time: {:.2?}",
                seed, outcome.stats.dfs_expansions, outcome.stats.bfs_expansions, elapsed
            ),
        }
        total_evicted += outcome.stats.evicted_nodes;
    }

    println!("\n--- Benchmark Complete ---");
    println!("Boards solved: {}/{}", solved, args.boards);
    if solved > 0 {
        println!("Average drops left: {:.2}", total_drops as f64 / solved as f64);
    }
    println!("Boards evicted from queues: {}", total_evicted);
    println!("Total time: {:.2?}", started.elapsed());
}
