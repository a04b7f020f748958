use crate::engine::{Board, GRID_SIZE, MAX_FILL};
use crate::error::ParseError;
use crate::solver::SearchOutcome;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Parses rows of digits into a `Board` with `supply` drops in hand.
///
/// Each string is one row, starting from the top. Missing rows, and missing
/// cells at the end of a short row, are empty. Each character must be a digit
/// from `0` to `MAX_FILL`.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(ParseError)` if there are more than `GRID_SIZE` rows, a row is longer
///   than `GRID_SIZE`, or a character is not a valid cell value.
///
/// # Examples
/// ```
/// use tendrops_solver::utils::board_from_rows;
///
/// let board = board_from_rows(3, &["1234", "", "4"]).unwrap();
/// assert_eq!(board.get(0, 3), 4);
/// assert_eq!(board.get(0, 4), 0);
/// assert_eq!(board.get(2, 0), 4);
/// assert_eq!(board.on_board(), 5);
///
/// assert!(board_from_rows(3, &["12a"]).is_err());
/// assert!(board_from_rows(3, &["5"]).is_err());
/// ```
pub fn board_from_rows(supply: u32, rows: &[&str]) -> Result<Board, ParseError> {
    if rows.len() > GRID_SIZE {
        return Err(ParseError::RowCount {
            expected: GRID_SIZE,
            found: rows.len(),
        });
    }

    let mut grid = [[0u8; GRID_SIZE]; GRID_SIZE];
    for (r, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found > GRID_SIZE {
            return Err(ParseError::RowLength {
                row: r,
                expected: GRID_SIZE,
                found,
            });
        }
        for (c, ch) in row.chars().enumerate() {
            grid[r][c] = parse_cell(ch, r, c)?;
        }
    }
    Ok(Board::from_grid(grid, supply))
}

/// Parses a complete board description.
///
/// The format is the drops-in-hand count on the first line followed by exactly
/// `GRID_SIZE` lines of `GRID_SIZE` digits each. Surrounding whitespace and
/// blank lines are ignored. Unlike [`board_from_rows`], nothing is padded.
///
/// # Examples
/// ```
/// use tendrops_solver::utils::board_from_str;
///
/// let board = board_from_str("9\n103233\n202140\n301440\n121040\n333321\n022432\n").unwrap();
/// assert_eq!(board.supply(), 9);
/// assert_eq!(board.get(5, 5), 2);
///
/// assert!(board_from_str("9\n103233\n").is_err());
/// ```
pub fn board_from_str(input: &str) -> Result<Board, ParseError> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());

    let supply_line = lines.next().ok_or(ParseError::MissingSupply)?;
    let supply: u32 = supply_line
        .parse()
        .map_err(|_| ParseError::InvalidSupply(supply_line.to_string()))?;

    let rows: Vec<&str> = lines.collect();
    if rows.len() != GRID_SIZE {
        return Err(ParseError::RowCount {
            expected: GRID_SIZE,
            found: rows.len(),
        });
    }
    for (r, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != GRID_SIZE {
            return Err(ParseError::RowLength {
                row: r,
                expected: GRID_SIZE,
                found,
            });
        }
    }
    board_from_rows(supply, &rows)
}

fn parse_cell(ch: char, row: usize, col: usize) -> Result<u8, ParseError> {
    match ch.to_digit(10) {
        Some(d) if d <= MAX_FILL as u32 => Ok(d as u8),
        _ => Err(ParseError::InvalidCell {
            ch,
            row,
            col,
            max: MAX_FILL,
        }),
    }
}

/// Encodes a cell index as `(row + 1) * 10 + column + 1`.
///
/// # Examples
/// ```
/// use tendrops_solver::utils::encode_move;
/// assert_eq!(encode_move(0), 11);
/// assert_eq!(encode_move(35), 66);
/// ```
pub fn encode_move(cell: usize) -> usize {
    (cell / GRID_SIZE + 1) * 10 + 1 + cell % GRID_SIZE
}

/// Human-readable summary of a search outcome.
pub fn format_solution(outcome: &SearchOutcome) -> String {
    let Some(solution) = &outcome.solution else {
        return "No solution or error.".to_string();
    };
    let moves: Vec<String> = solution
        .encoded_moves()
        .iter()
        .map(|m| m.to_string())
        .collect();
    format!(
        "Solution with {} drops after {} dfs and {} bfs:\n{}",
        solution.supply,
        outcome.stats.dfs_expansions,
        outcome.stats.bfs_expansions,
        moves.join(" ")
    )
}

/// Appends the board in record format to the file at `path`, creating it if needed.
pub fn append_board_record(path: &Path, board: &Board) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(board.to_record_string().as_bytes())
}

/// Appends the outcome summary to the file at `path`, creating it if needed.
pub fn append_solution_record(path: &Path, outcome: &SearchOutcome) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", format_solution(outcome))
}
