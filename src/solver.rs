//! Hybrid search for the longest-lasting clear of a board.
//!
//! The best-first driver pops the most promising board from a
//! [`BoundedQueue`] and either expands it one placement at a time or, once
//! few enough cells are occupied, hands it to an exhaustive depth-first search
//! that enumerates every canonical move ordering. Both modes share a
//! [`SearchContext`] that holds the best completion found so far and the
//! expansion counters.
use crate::engine::{Board, Placement, CELL_COUNT, MAX_FILL, MAX_MOVES};
use crate::heuristics::can_beat;
use crate::queue::BoundedQueue;
use crate::utils::encode_move;
use std::cmp::Ordering;
use tracing::{info, trace};

/// Default number of boards the best-first queue may hold.
pub const DEFAULT_QUEUE_CAPACITY: usize = 600_000;
/// Default distance from capacity at which the queue evicts.
pub const DEFAULT_EVICTION_MARGIN: usize = 40;
/// Default on-board count at or below which the exhaustive search takes over.
pub const DEFAULT_EXHAUSTIVE_THRESHOLD: u32 = 11;

/// Tunables for a search run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub queue_capacity: usize,
    pub eviction_margin: usize,
    pub exhaustive_threshold: u32,
    /// Longest move sequence considered; clamped to `MAX_MOVES`.
    pub max_moves: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            eviction_margin: DEFAULT_EVICTION_MARGIN,
            exhaustive_threshold: DEFAULT_EXHAUSTIVE_THRESHOLD,
            max_moves: MAX_MOVES,
        }
    }
}

/// Counters collected during a run. Reporting only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Boards expanded by the exhaustive search.
    pub dfs_expansions: u64,
    /// Boards inserted into the best-first queue.
    pub bfs_expansions: u64,
    /// Times the queue dropped its worst half.
    pub eviction_passes: u64,
    /// Boards discarded by those evictions.
    pub evicted_nodes: u64,
    /// Placements the simulator refused.
    pub rejected_placements: u64,
    /// Times the best-known solution improved.
    pub improvements: u64,
}

/// Best completion found so far.
///
/// A completion is a cleared board. `depth` is the drops it ends with;
/// `min_moves` is the fewest moves among completions ending at `depth`.
#[derive(Clone, Debug)]
pub struct BestSolution {
    board: Board,
    depth: u32,
    min_moves: usize,
}

impl BestSolution {
    /// Starts from the initial board, which only counts if it is already clear.
    pub fn new(initial: &Board) -> Self {
        BestSolution {
            board: initial.clone(),
            depth: 0,
            min_moves: usize::MAX,
        }
    }

    /// Records `board` if it is a completion that ends with more drops than
    /// the best, or with as many drops in fewer moves.
    ///
    /// Returns `true` if the best solution changed.
    pub fn offer(&mut self, board: &Board) -> bool {
        if !board.is_cleared() || board.supply() == 0 {
            return false;
        }
        let better = match board.supply().cmp(&self.depth) {
            Ordering::Greater => true,
            Ordering::Equal => board.move_count() < self.min_moves,
            Ordering::Less => false,
        };
        if !better {
            return false;
        }
        self.board = board.clone();
        self.depth = board.supply();
        self.min_moves = board.move_count();
        true
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn min_moves(&self) -> usize {
        self.min_moves
    }

    /// `true` once some completion has been recorded.
    pub fn is_found(&self) -> bool {
        self.board.is_cleared() && self.depth > 0
    }
}

/// A completed move sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Cells played, in order.
    pub moves: Vec<usize>,
    /// Drops in hand after the last move.
    pub supply: u32,
}

impl Solution {
    /// Moves in the `(row + 1) * 10 + column + 1` notation.
    pub fn encoded_moves(&self) -> Vec<usize> {
        self.moves.iter().map(|&cell| encode_move(cell)).collect()
    }

    /// Re-plays the moves on `initial`, returning every board after each move.
    ///
    /// Stops early if a move is rejected, which means `initial` is not the
    /// board this solution was found for.
    pub fn replay(&self, initial: &Board) -> Vec<Board> {
        let mut board = initial.clone();
        let mut boards = Vec::with_capacity(self.moves.len());
        for &cell in &self.moves {
            if !board.play(cell).is_applied() {
                break;
            }
            boards.push(board.clone());
        }
        boards
    }
}

/// What a run produced.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Best completion, or `None` if no clear was found.
    pub solution: Option<Solution>,
    pub stats: SearchStats,
}

/// State shared by the best-first driver and the exhaustive search.
#[derive(Debug)]
pub struct SearchContext {
    config: SearchConfig,
    best: BestSolution,
    stats: SearchStats,
}

impl SearchContext {
    pub fn new(initial: &Board, mut config: SearchConfig) -> Self {
        config.max_moves = config.max_moves.min(MAX_MOVES);
        SearchContext {
            config,
            best: BestSolution::new(initial),
            stats: SearchStats::default(),
        }
    }

    pub fn best(&self) -> &BestSolution {
        &self.best
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Consumes the context, producing the run's outcome.
    pub fn into_outcome(self) -> SearchOutcome {
        let solution = self.best.is_found().then(|| Solution {
            moves: self.best.board().moves().iter().map(|&c| c as usize).collect(),
            supply: self.best.depth(),
        });
        SearchOutcome {
            solution,
            stats: self.stats,
        }
    }

    // Offers a cleared board to the best solution. Returns true if it was cleared.
    fn check_completion(&mut self, board: &Board) -> bool {
        if !board.is_cleared() {
            return false;
        }
        if self.best.offer(board) {
            self.stats.improvements += 1;
            info!(
                drops = board.supply(),
                moves = board.move_count(),
                dfs = self.stats.dfs_expansions,
                bfs = self.stats.bfs_expansions,
                "found better solution"
            );
        }
        true
    }

    // Whether an uncleared board can still improve on the best solution.
    // Clearing it takes at least one more move, and every move costs at least
    // one unit of potential, so it ends with at most `potential - 1` drops.
    fn is_promising(&self, board: &Board) -> bool {
        if board.supply() == 0 || board.move_count() >= self.config.max_moves {
            return false;
        }
        let depth = self.best.depth();
        if can_beat(board, depth.saturating_add(1)) {
            return true;
        }
        // Can at best tie, which only helps with fewer moves.
        can_beat(board, depth) && board.move_count() + 1 < self.best.min_moves()
    }

    /// Exhaustively searches every canonical move ordering from `board`.
    ///
    /// Forced bursts (cells at `MAX_FILL`) are tried first on every cell and
    /// restart the scan at `0` in the child. Then cells one, two, and three
    /// drops short of bursting are tried, each tier only from `start` onwards, so
    /// a multiset of non-bursting moves is explored in one order only.
    ///
    /// Recursion depth is bounded by `max_moves`.
    pub fn exhaustive(&mut self, board: &Board, start: usize) {
        if self.check_completion(board) || !self.is_promising(board) {
            return;
        }
        self.stats.dfs_expansions += 1;

        for cell in 0..CELL_COUNT {
            if board.cell(cell) == MAX_FILL {
                if let Some(child) = self.child(board, cell) {
                    self.exhaustive(&child, 0);
                }
            }
        }
        for fill in (1..MAX_FILL).rev() {
            for cell in start..CELL_COUNT {
                if board.cell(cell) == fill {
                    if let Some(child) = self.child(board, cell) {
                        self.exhaustive(&child, cell);
                    }
                }
            }
        }
    }

    /// Runs the best-first search from `initial` until the queue drains.
    pub fn best_first(&mut self, initial: Board) {
        let mut queue = BoundedQueue::new(self.config.queue_capacity, self.config.eviction_margin);
        queue.push(initial);

        while let Some(node) = queue.pop() {
            if queue.is_nearly_full() {
                queue.evict_worst_half();
            }

            let board = node.board;
            if board.on_board() <= self.config.exhaustive_threshold {
                self.exhaustive(&board, board.resume_hint());
                continue;
            }
            if !self.is_promising(&board) {
                continue;
            }

            trace!(score = node.score, moves = board.move_count(), queued = queue.len(), "expanding");
            for cell in board.resume_hint()..CELL_COUNT {
                if board.cell(cell) == 0 {
                    continue;
                }
                let Some(child) = self.child(&board, cell) else {
                    continue;
                };
                if self.check_completion(&child) || !self.is_promising(&child) {
                    continue;
                }
                self.stats.bfs_expansions += 1;
                queue.push(child);
            }
        }

        self.stats.eviction_passes += queue.eviction_passes();
        self.stats.evicted_nodes += queue.evicted_nodes();
    }

    // Copy of `board` with `cell` played, or None if the simulator refused it.
    fn child(&mut self, board: &Board, cell: usize) -> Option<Board> {
        let mut child = board.clone();
        match child.play(cell) {
            Placement::Rejected => {
                self.stats.rejected_placements += 1;
                None
            }
            _ => Some(child),
        }
    }
}

/// Searches for the clear of `initial` that ends with the most drops in hand.
///
/// # Examples
/// ```
/// use tendrops_solver::solver::{solve, SearchConfig};
/// use tendrops_solver::utils::board_from_rows;
///
/// // Three full cells in a row: one drop sets off all three bursts,
/// // which recycle the drop.
/// let board = board_from_rows(1, &["444000"]).unwrap();
/// let outcome = solve(&board, SearchConfig::default());
/// let solution = outcome.solution.unwrap();
/// assert_eq!(solution.supply, 1);
/// assert_eq!(solution.encoded_moves(), vec![11]);
/// ```
pub fn solve(initial: &Board, config: SearchConfig) -> SearchOutcome {
    info!(
        drops = initial.supply(),
        on_board = initial.on_board(),
        capacity = config.queue_capacity,
        threshold = config.exhaustive_threshold,
        "starting search"
    );
    let mut context = SearchContext::new(initial, config);
    context.best_first(initial.clone());
    let outcome = context.into_outcome();
    info!(
        found = outcome.solution.is_some(),
        drops = outcome.solution.as_ref().map_or(0, |s| s.supply),
        dfs = outcome.stats.dfs_expansions,
        bfs = outcome.stats.bfs_expansions,
        evicted = outcome.stats.evicted_nodes,
        "search finished"
    );
    outcome
}
