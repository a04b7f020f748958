//! # Ten Drops Solver Library
//!
//! This library simulates the Ten Drops puzzle and searches for the move
//! sequence that clears a 6x6 board while keeping the most drops in hand.
//!
//! Placing a drop on a cell holding four drops makes it burst: the cell
//! empties and sends one drop flying in each direction. Flying drops land on
//! the next occupied cell, possibly making it burst in turn. Every three
//! bursts set off by a single placement return one drop to the hand.
//!
//! It is used by two binaries:
//! - `ai_solver`: Reads a board, runs the search, and prints the best clear found.
//! - `board_benchmark`: Runs the search over seeded random boards and reports statistics.
//!
//! ## Modules
//! - `engine`: The board (`Board`), flying drops (`Flight`, `FlightSchedule`), and the
//!   burst propagation simulator (`Board::drop_in`, `Board::play`).
//! - `heuristics`: The board evaluation used to order the best-first search.
//! - `queue`: The bounded priority queue of scored boards.
//! - `solver`: The best-first driver and the exhaustive depth-first search.
//! - `utils`: Board parsing, move encoding, and record file output.
//! - `error`: Error types.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod queue;
pub mod solver;
pub mod utils;

// Items should be accessed via their module path, e.g.
// `tendrops_solver::solver::solve`, to keep the top-level namespace small.
