use crate::engine::{Board, MAX_FILL};

/// Score for an empty cell.
pub const EMPTY_CELL_SCORE: i32 = 10;
/// Score for a cell one drop away from bursting.
pub const PRIMED_CELL_SCORE: i32 = 9;
/// Score for a cell two drops away from bursting.
pub const NEAR_PRIMED_CELL_SCORE: i32 = 5;
/// Score for a cell three drops away from bursting.
pub const LOW_FILL_CELL_SCORE: i32 = 2;
/// Bonus per drop in hand.
pub const SUPPLY_WEIGHT: i32 = 25;
/// Penalty per move already played.
pub const MOVE_PENALTY: i32 = 30;

/// Score contribution of a single cell.
///
/// Empty cells score highest, cells about to burst next, and the
/// emptiest non-empty cells (a single drop) score nothing.
pub fn cell_score(value: u8) -> i32 {
    if value == 0 {
        return EMPTY_CELL_SCORE;
    }
    match MAX_FILL.saturating_sub(value) {
        0 => PRIMED_CELL_SCORE,
        1 => NEAR_PRIMED_CELL_SCORE,
        2 => LOW_FILL_CELL_SCORE,
        _ => 0,
    }
}

/// Ranks a board for the best-first queue.
///
/// The score favours boards that are mostly empty or primed to burst, rewards
/// drops still in hand, and penalises moves already spent. It only orders the
/// search; correctness never depends on it.
///
/// # Examples
/// ```
/// use tendrops_solver::engine::Board;
/// use tendrops_solver::heuristics::evaluate;
/// // 36 empty cells, 2 drops in hand, no moves.
/// assert_eq!(evaluate(&Board::new_empty(2)), 36 * 10 + 2 * 25);
/// ```
pub fn evaluate(board: &Board) -> i64 {
    let fill: i64 = board.cells().iter().map(|&v| i64::from(cell_score(v))).sum();
    fill + i64::from(board.supply()) * i64::from(SUPPLY_WEIGHT)
        - board.move_count() as i64 * i64::from(MOVE_PENALTY)
}

/// `true` if `board` can still end with more than `best_depth` drops in hand.
pub fn can_beat(board: &Board, best_depth: u32) -> bool {
    board.potential() > best_depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_rows;

    #[test]
    fn test_cell_score_scale() {
        assert_eq!(cell_score(0), EMPTY_CELL_SCORE);
        assert_eq!(cell_score(4), PRIMED_CELL_SCORE);
        assert_eq!(cell_score(3), NEAR_PRIMED_CELL_SCORE);
        assert_eq!(cell_score(2), LOW_FILL_CELL_SCORE);
        assert_eq!(cell_score(1), 0);
        assert!(cell_score(0) > cell_score(4));
        assert!(cell_score(4) > cell_score(3));
        assert!(cell_score(3) > cell_score(2));
    }

    #[test]
    fn test_evaluate_counts_cells_supply_and_moves() {
        let mut board = board_from_rows(3, &["432100"]).unwrap();
        // 32 empty cells plus one cell of each fill.
        let expected = 32 * 10 + 9 + 5 + 2 + 3 * 25;
        assert_eq!(evaluate(&board), expected);

        // 3 -> 4: +4 for the cell, -25 for the drop, -30 for the move.
        assert!(board.play(1).is_applied());
        assert_eq!(evaluate(&board), expected + 4 - 25 - 30);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let board = crate::engine::Board::new_random_with_seed(3, 9);
        assert_eq!(evaluate(&board), evaluate(&board));
        assert_eq!(evaluate(&board), evaluate(&board.clone()));
    }

    #[test]
    fn test_can_beat_uses_potential() {
        // 6 occupied cells recycle at most 2 drops.
        let board = board_from_rows(1, &["111111"]).unwrap();
        assert_eq!(board.potential(), 3);
        assert!(can_beat(&board, 2));
        assert!(!can_beat(&board, 3));
    }

    #[test]
    fn test_evaluate_handles_any_supply() {
        let board = crate::engine::Board::new_empty(u32::MAX);
        assert_eq!(evaluate(&board), 36 * 10 + i64::from(u32::MAX) * 25);
        assert!(evaluate(&board) > evaluate(&crate::engine::Board::new_empty(u32::MAX - 1)));
    }
}
