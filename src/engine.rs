//! Core simulation engine for the Ten Drops puzzle.
//!
//! This module defines the game's fundamental components:
//! - Grid and rule constants (`GRID_SIZE`, `MAX_FILL`, `RECYCLE_RATIO`, ...).
//! - `Direction`: the four directions a bursting cell launches drops in.
//! - `FlightSchedule`: a ring buffer of in-flight drops, indexed by arrival tick.
//! - `Board`: the grid, the drops in hand, the move history, and the burst
//!   propagation simulator (`Board::drop_in` / `Board::play`).
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::warn;

/// Width and height of the (square) grid.
pub const GRID_SIZE: usize = 6;

/// Number of cells on the grid, indexed row-major from `0`.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Largest value a cell can hold without bursting.
pub const MAX_FILL: u8 = 4;

/// Value at which a cell bursts.
pub const OVERFLOW: u8 = MAX_FILL + 1;

/// Every `RECYCLE_RATIO` bursts caused by one placement return one drop to the hand.
pub const RECYCLE_RATIO: u32 = 3;

/// Hard cap on the length of a move history.
pub const MAX_MOVES: usize = 24;

/// Slots in the flight ring buffer. A drop travels at most `GRID_SIZE - 1`
/// cells, which costs at most `2 * (GRID_SIZE - 1)` ticks.
pub const FLIGHT_SLOTS: usize = 2 * GRID_SIZE;

const _: () = assert!(2 * (GRID_SIZE - 1) < FLIGHT_SLOTS);
const _: () = assert!(CELL_COUNT <= u8::MAX as usize);

/// Direction of travel for a drop launched by a burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Increasing column.
    Right,
    /// Increasing row.
    Down,
    /// Decreasing column.
    Left,
    /// Decreasing row.
    Up,
}

impl Direction {
    /// All directions, in the order a burst launches them.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Returns the neighbouring cell index in this direction, or `None` at the grid edge.
    ///
    /// # Examples
    /// ```
    /// use tendrops_solver::engine::{Direction, GRID_SIZE};
    /// assert_eq!(Direction::Right.step(0), Some(1));
    /// assert_eq!(Direction::Left.step(0), None);
    /// assert_eq!(Direction::Down.step(0), Some(GRID_SIZE));
    /// ```
    pub fn step(self, cell: usize) -> Option<usize> {
        let (row, col) = (cell / GRID_SIZE, cell % GRID_SIZE);
        if row >= GRID_SIZE {
            return None;
        }
        match self {
            Direction::Right if col + 1 < GRID_SIZE => Some(cell + 1),
            Direction::Down if row + 1 < GRID_SIZE => Some(cell + GRID_SIZE),
            Direction::Left if col > 0 => Some(cell - 1),
            Direction::Up if row > 0 => Some(cell - GRID_SIZE),
            _ => None,
        }
    }
}

/// A drop in flight: where it will land next and which way it is travelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flight {
    pub dest: usize,
    pub dir: Direction,
}

/// Ring buffer of in-flight drops grouped by arrival tick.
///
/// Invariant: the slot at offset `0` always holds the drops arriving at the
/// current tick. `advance` rotates the ring straight to the next tick that has
/// arrivals, so empty ticks are never visited.
#[derive(Debug)]
pub struct FlightSchedule {
    slots: [Vec<Flight>; FLIGHT_SLOTS],
    head: usize,
    in_flight: usize,
    now: u32,
}

impl FlightSchedule {
    /// Creates an empty schedule positioned at tick `0`.
    pub fn new() -> Self {
        FlightSchedule {
            slots: std::array::from_fn(|_| Vec::new()),
            head: 0,
            in_flight: 0,
            now: 0,
        }
    }

    /// Schedules `flight` to land `delay` ticks from now.
    ///
    /// # Panics
    /// Panics if `delay` is `0` or does not fit in the ring (`delay >= FLIGHT_SLOTS`).
    pub fn schedule(&mut self, delay: usize, flight: Flight) {
        assert!(
            delay > 0 && delay < FLIGHT_SLOTS,
            "flight delay {} outside 1..{}",
            delay,
            FLIGHT_SLOTS
        );
        let slot = (self.head + delay) % FLIGHT_SLOTS;
        self.slots[slot].push(flight);
        self.in_flight += 1;
    }

    /// Removes and returns every drop landing at the current tick.
    pub fn take_arrivals(&mut self) -> Vec<Flight> {
        let arrivals = std::mem::take(&mut self.slots[self.head]);
        self.in_flight -= arrivals.len();
        arrivals
    }

    /// Jumps to the next tick with scheduled arrivals.
    ///
    /// Returns `false` when nothing is left in flight.
    pub fn advance(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        for offset in 1..FLIGHT_SLOTS {
            let slot = (self.head + offset) % FLIGHT_SLOTS;
            if !self.slots[slot].is_empty() {
                self.head = slot;
                self.now += offset as u32;
                return true;
            }
        }
        false
    }

    /// Number of drops currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Ticks elapsed since the schedule was created.
    pub fn now(&self) -> u32 {
        self.now
    }
}

impl Default for FlightSchedule {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of dropping one unit onto the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The cell took the drop without reaching the burst value.
    Absorbed,
    /// The cell burst and set off a cascade.
    Burst {
        /// Cells emptied by the cascade, including the target.
        bursts: u32,
        /// Drops returned to the hand (`bursts / RECYCLE_RATIO`).
        recovered: u32,
        /// Tick at which the last drop of the cascade landed or vanished.
        ticks: u32,
    },
    /// The placement was inconsistent with the board; nothing changed.
    Rejected,
}

impl Placement {
    /// `true` unless the placement was rejected.
    pub fn is_applied(&self) -> bool {
        !matches!(self, Placement::Rejected)
    }

    /// `true` if the placement set off a burst.
    pub fn is_burst(&self) -> bool {
        matches!(self, Placement::Burst { .. })
    }
}

/// Board state: the grid, the drops in hand, and how we got here.
///
/// Boards are value snapshots. The search branches by cloning a parent and
/// playing one move on the copy; a board handed to the queue or to the
/// exhaustive search is never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; CELL_COUNT],
    supply: u32,
    occupied: u32,
    moves: [u8; MAX_MOVES],
    move_count: usize,
    resume_hint: usize,
}

impl Board {
    /// Creates a board from row-major cell values and a number of drops in hand.
    ///
    /// The on-board count is derived from the cells.
    ///
    /// # Examples
    /// ```
    /// use tendrops_solver::engine::{Board, CELL_COUNT};
    /// let mut cells = [0u8; CELL_COUNT];
    /// cells[0] = 3;
    /// cells[7] = 4;
    /// let board = Board::new(cells, 5);
    /// assert_eq!(board.supply(), 5);
    /// assert_eq!(board.on_board(), 2);
    /// assert_eq!(board.move_count(), 0);
    /// ```
    pub fn new(cells: [u8; CELL_COUNT], supply: u32) -> Self {
        let occupied = cells.iter().filter(|&&v| v > 0).count() as u32;
        Board {
            cells,
            supply,
            occupied,
            moves: [0; MAX_MOVES],
            move_count: 0,
            resume_hint: 0,
        }
    }

    /// Creates an empty grid with `supply` drops in hand.
    pub fn new_empty(supply: u32) -> Self {
        Board::new([0; CELL_COUNT], supply)
    }

    /// Creates a board from a 2D grid of cell values.
    pub fn from_grid(grid: [[u8; GRID_SIZE]; GRID_SIZE], supply: u32) -> Self {
        let mut cells = [0u8; CELL_COUNT];
        for (r, row) in grid.iter().enumerate() {
            cells[r * GRID_SIZE..(r + 1) * GRID_SIZE].copy_from_slice(row);
        }
        Board::new(cells, supply)
    }

    /// Creates a reproducible random board.
    ///
    /// Every cell is drawn uniformly from `0..=MAX_FILL`. The same seed always
    /// produces the same board.
    pub fn new_random_with_seed(seed: u64, supply: u32) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut cells = [0u8; CELL_COUNT];
        for cell in cells.iter_mut() {
            *cell = rng.gen_range(0..=MAX_FILL);
        }
        Board::new(cells, supply)
    }

    /// Value held by `cell`.
    ///
    /// # Panics
    /// Panics if `cell >= CELL_COUNT`.
    pub fn cell(&self, cell: usize) -> u8 {
        self.cells[cell]
    }

    /// Value held at row `r`, column `c` (both 0-based).
    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.cells[r * GRID_SIZE + c]
    }

    /// All cell values, row-major.
    pub fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.cells
    }

    /// Drops in hand.
    pub fn supply(&self) -> u32 {
        self.supply
    }

    /// Number of non-empty cells.
    pub fn on_board(&self) -> u32 {
        self.occupied
    }

    /// Cells played so far, in order.
    pub fn moves(&self) -> &[u8] {
        &self.moves[..self.move_count]
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Lowest cell index a non-bursting move from this board may target.
    pub fn resume_hint(&self) -> usize {
        self.resume_hint
    }

    /// `true` once every cell is empty.
    pub fn is_cleared(&self) -> bool {
        self.occupied == 0
    }

    /// Upper bound on the drops this board can end with: each occupied cell
    /// bursts at most once, and bursts recycle at `RECYCLE_RATIO`.
    ///
    /// Every applied placement lowers it by at least one.
    pub fn potential(&self) -> u32 {
        self.supply.saturating_add(self.occupied / RECYCLE_RATIO)
    }

    /// Drops one unit from the hand onto `cell` and resolves the cascade.
    ///
    /// A cell below `MAX_FILL` just takes the drop. A cell at `MAX_FILL` bursts:
    /// it empties and launches one drop in each direction. A launched drop lands
    /// on the nearest non-empty cell in its direction or leaves the grid. Launch
    /// costs `2 * distance - 1` ticks; a drop whose landing cell was emptied
    /// before it arrived keeps going, costing `2 * distance` ticks to the next one.
    /// Every cell pushed past `MAX_FILL` bursts after the arrivals of its tick.
    ///
    /// Targets that are empty, overfull, or off the grid, and placements with an
    /// empty hand, are rejected without touching the board.
    ///
    /// The move history is not updated; see [`Board::play`].
    pub fn drop_in(&mut self, cell: usize) -> Placement {
        let Some(&value) = self.cells.get(cell) else {
            warn!(cell, "placement off the grid skipped");
            return Placement::Rejected;
        };
        if self.supply == 0 || value == 0 || value > MAX_FILL {
            warn!(cell, value, supply = self.supply, "inconsistent placement skipped");
            return Placement::Rejected;
        }

        self.supply -= 1;
        if value < MAX_FILL {
            self.cells[cell] += 1;
            return Placement::Absorbed;
        }

        self.cells[cell] = OVERFLOW;
        let (bursts, ticks) = self.cascade();
        let recovered = bursts / RECYCLE_RATIO;
        self.supply = self.supply.saturating_add(recovered);
        self.occupied -= bursts;
        Placement::Burst {
            bursts,
            recovered,
            ticks,
        }
    }

    /// Plays a move: `drop_in` plus bookkeeping.
    ///
    /// On success the cell is appended to the move history and the resumption
    /// hint is set to the played cell, or back to `0` if the move burst (a burst
    /// can change cells anywhere on the grid).
    pub fn play(&mut self, cell: usize) -> Placement {
        if self.move_count >= MAX_MOVES {
            warn!(cell, moves = self.move_count, "move history full, placement skipped");
            return Placement::Rejected;
        }
        let placement = self.drop_in(cell);
        if placement.is_applied() {
            self.moves[self.move_count] = cell as u8;
            self.move_count += 1;
            self.resume_hint = if placement.is_burst() { 0 } else { cell };
        }
        placement
    }

    // Runs bursts and flights until nothing is in the air.
    // Returns (cells burst, tick of the last event).
    fn cascade(&mut self) -> (u32, u32) {
        let mut schedule = FlightSchedule::new();
        let mut bursts = 0;

        loop {
            for flight in schedule.take_arrivals() {
                if self.cells[flight.dest] != 0 {
                    self.cells[flight.dest] += 1;
                } else if let Some((dest, distance)) = self.seek(flight.dest, flight.dir) {
                    schedule.schedule(2 * distance, Flight { dest, dir: flight.dir });
                }
            }

            for cell in 0..CELL_COUNT {
                if self.cells[cell] < OVERFLOW {
                    continue;
                }
                self.cells[cell] = 0;
                bursts += 1;
                for dir in Direction::ALL {
                    if let Some((dest, distance)) = self.seek(cell, dir) {
                        schedule.schedule(2 * distance - 1, Flight { dest, dir });
                    }
                }
            }

            if !schedule.advance() {
                break;
            }
        }

        (bursts, schedule.now())
    }

    // Nearest non-empty cell from `from` (exclusive) along `dir`, with its distance in cells.
    fn seek(&self, from: usize, dir: Direction) -> Option<(usize, usize)> {
        let mut cell = from;
        let mut distance = 0;
        while let Some(next) = dir.step(cell) {
            distance += 1;
            if self.cells[next] != 0 {
                return Some((next, distance));
            }
            cell = next;
        }
        None
    }

    /// Renders the grid with 1-based row/column labels (matching the move encoding).
    ///
    /// If `pos` is `Some(cell)`, that cell is shown in brackets.
    pub fn to_string_with_highlight(&self, pos: Option<usize>) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c in 0..GRID_SIZE {
            output.push_str(&format!(" {} ", c + 1));
        }
        output.push('\n');

        for r in 0..GRID_SIZE {
            output.push_str(&format!("{} ", r + 1));
            for c in 0..GRID_SIZE {
                let idx = r * GRID_SIZE + c;
                let glyph = match self.cells[idx] {
                    0 => '.',
                    v => char::from(b'0' + v),
                };
                if pos == Some(idx) {
                    output.push_str(&format!("[{}]", glyph));
                } else {
                    output.push_str(&format!(" {} ", glyph));
                }
            }
            output.push('\n');
        }
        output.push_str(&format!("drops in hand: {}", self.supply));

        output
    }

    /// Renders the board in the record format: the supply on one line, then
    /// one line of digits per row.
    pub fn to_record_string(&self) -> String {
        let mut output = format!("{}\n", self.supply);
        for row in self.cells.chunks(GRID_SIZE) {
            for &v in row {
                output.push(char::from(b'0' + v));
            }
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_rows;
    use rand::seq::SliceRandom;

    #[test]
    fn test_new_counts_occupied_cells() {
        let board = board_from_rows(3, &["103233", "202140", "000000", "000000", "000000", "000000"])
            .unwrap();
        assert_eq!(board.on_board(), 9);
        assert_eq!(board.supply(), 3);
        assert_eq!(board.get(0, 0), 1);
        assert_eq!(board.get(1, 4), 4);
        assert!(board.moves().is_empty());
    }

    #[test]
    fn test_direction_step_edges() {
        assert_eq!(Direction::Right.step(GRID_SIZE - 1), None);
        assert_eq!(Direction::Left.step(GRID_SIZE), None);
        assert_eq!(Direction::Up.step(3), None);
        assert_eq!(Direction::Down.step(CELL_COUNT - 1), None);
        assert_eq!(Direction::Up.step(GRID_SIZE + 2), Some(2));
        assert_eq!(Direction::Right.step(CELL_COUNT), None);
    }

    #[test]
    fn test_schedule_skips_empty_ticks() {
        let mut schedule = FlightSchedule::new();
        schedule.schedule(3, Flight { dest: 4, dir: Direction::Right });
        schedule.schedule(9, Flight { dest: 5, dir: Direction::Down });
        assert_eq!(schedule.in_flight(), 2);
        assert!(schedule.take_arrivals().is_empty());

        assert!(schedule.advance());
        assert_eq!(schedule.now(), 3);
        assert_eq!(schedule.take_arrivals(), vec![Flight { dest: 4, dir: Direction::Right }]);

        // Wraps around the ring: 3 + 10 > FLIGHT_SLOTS.
        schedule.schedule(10, Flight { dest: 6, dir: Direction::Up });
        assert!(schedule.advance());
        assert_eq!(schedule.now(), 9);
        assert_eq!(schedule.take_arrivals().len(), 1);
        assert!(schedule.advance());
        assert_eq!(schedule.now(), 13);
        assert_eq!(schedule.take_arrivals()[0].dest, 6);
        assert!(!schedule.advance());
    }

    #[test]
    #[should_panic]
    fn test_schedule_rejects_oversized_delay() {
        let mut schedule = FlightSchedule::new();
        schedule.schedule(FLIGHT_SLOTS, Flight { dest: 0, dir: Direction::Left });
    }

    #[test]
    fn test_drop_in_below_threshold() {
        let mut board = board_from_rows(2, &["030000"]).unwrap();
        assert_eq!(board.drop_in(1), Placement::Absorbed);
        assert_eq!(board.cell(1), 4);
        assert_eq!(board.supply(), 1);
        assert_eq!(board.on_board(), 1);
    }

    #[test]
    fn test_burst_deposits_into_neighbour_only() {
        // A full cell next to a single drop; nothing else on the board.
        let mut board = board_from_rows(1, &["", "", "004100"]).unwrap();
        let placement = board.play(14);
        assert_eq!(
            placement,
            Placement::Burst {
                bursts: 1,
                recovered: 0,
                ticks: 1
            }
        );
        assert_eq!(board.cell(14), 0);
        assert_eq!(board.cell(15), 2);
        assert_eq!(board.supply(), 0);
        assert_eq!(board.on_board(), 1);
        assert_eq!(board.moves(), &[14]);
        assert_eq!(board.resume_hint(), 0);
    }

    #[test]
    fn test_burst_at_corner_loses_off_grid_drops() {
        let mut board = board_from_rows(1, &["400000", "", "100000"]).unwrap();
        let placement = board.drop_in(0);
        // Only the downward drop lands, after crossing one empty cell (3 ticks).
        assert_eq!(
            placement,
            Placement::Burst {
                bursts: 1,
                recovered: 0,
                ticks: 3
            }
        );
        assert_eq!(board.cell(12), 2);
        assert_eq!(board.on_board(), 1);
    }

    #[test]
    fn test_chain_reaction_recycles_drop() {
        let mut board = board_from_rows(1, &["444100"]).unwrap();
        let placement = board.drop_in(0);
        assert_eq!(
            placement,
            Placement::Burst {
                bursts: 3,
                recovered: 1,
                ticks: 3
            }
        );
        assert_eq!(board.cells()[..4], [0, 0, 0, 2]);
        assert_eq!(board.supply(), 1);
        assert_eq!(board.on_board(), 1);
    }

    #[test]
    fn test_drop_passes_through_emptied_cell() {
        // The burst at column 0 aims at column 3, which bursts before the drop
        // lands; the drop carries on to column 5.
        let mut board = board_from_rows(1, &["440401"]).unwrap();
        let placement = board.drop_in(1);
        assert_eq!(
            placement,
            Placement::Burst {
                bursts: 3,
                recovered: 1,
                ticks: 10
            }
        );
        assert_eq!(board.cells()[..GRID_SIZE], [0, 0, 0, 0, 0, 3]);
        assert_eq!(board.supply(), 1);
        assert_eq!(board.on_board(), 1);
    }

    #[test]
    fn test_simultaneous_bursts_clear_row() {
        let mut board = board_from_rows(2, &["3444"]).unwrap();
        let placement = board.play(1);
        assert!(placement.is_burst());
        assert!(board.is_cleared());
        assert_eq!(board.supply(), 2);
    }

    #[test]
    fn test_rejected_placements_leave_board_untouched() {
        let board = board_from_rows(1, &["410000"]).unwrap();

        let mut empty_target = board.clone();
        assert_eq!(empty_target.play(5), Placement::Rejected);
        assert_eq!(empty_target, board);

        let mut off_grid = board.clone();
        assert_eq!(off_grid.play(CELL_COUNT), Placement::Rejected);
        assert_eq!(off_grid, board);

        let mut no_supply = board_from_rows(0, &["410000"]).unwrap();
        let snapshot = no_supply.clone();
        assert_eq!(no_supply.play(0), Placement::Rejected);
        assert_eq!(no_supply, snapshot);

        let mut overfull = Board::new(
            {
                let mut cells = [0; CELL_COUNT];
                cells[0] = OVERFLOW + 1;
                cells
            },
            1,
        );
        let snapshot = overfull.clone();
        assert_eq!(overfull.play(0), Placement::Rejected);
        assert_eq!(overfull, snapshot);
    }

    #[test]
    fn test_play_sets_resume_hint() {
        let mut board = board_from_rows(3, &["120000", "000400"]).unwrap();
        assert_eq!(board.play(1), Placement::Absorbed);
        assert_eq!(board.resume_hint(), 1);
        assert!(board.play(9).is_burst());
        assert_eq!(board.resume_hint(), 0);
        assert_eq!(board.moves(), &[1, 9]);
    }

    #[test]
    fn test_move_history_is_capped() {
        let mut board = Board::new([1; CELL_COUNT], 100);
        let mut played = 0;
        // Cells holding 1 can take three drops each without bursting.
        for cell in 0..CELL_COUNT {
            for _ in 0..3 {
                if board.play(cell).is_applied() {
                    played += 1;
                }
            }
        }
        assert_eq!(played, MAX_MOVES);
        assert_eq!(board.move_count(), MAX_MOVES);
        assert_eq!(board.supply(), 100 - MAX_MOVES as u32);
    }

    #[test]
    fn test_random_board_is_reproducible() {
        let a = Board::new_random_with_seed(42, 10);
        let b = Board::new_random_with_seed(42, 10);
        assert_eq!(a, b);
        assert!(a.cells().iter().all(|&v| v <= MAX_FILL));
        let occupied = a.cells().iter().filter(|&&v| v > 0).count() as u32;
        assert_eq!(a.on_board(), occupied);
    }

    #[test]
    fn test_random_play_conserves_drops() {
        let mut rng = SmallRng::seed_from_u64(7);
        for seed in 0..50 {
            let mut board = Board::new_random_with_seed(seed, 20);
            for _ in 0..MAX_MOVES {
                let candidates: Vec<usize> =
                    (0..CELL_COUNT).filter(|&c| board.cell(c) > 0).collect();
                let Some(&cell) = candidates.choose(&mut rng) else {
                    break;
                };
                if board.supply() == 0 {
                    break;
                }
                let before = board.clone();
                match board.play(cell) {
                    Placement::Absorbed => {
                        assert_eq!(board.supply(), before.supply() - 1);
                        assert_eq!(board.on_board(), before.on_board());
                    }
                    Placement::Burst {
                        bursts, recovered, ..
                    } => {
                        assert_eq!(recovered, bursts / RECYCLE_RATIO);
                        assert_eq!(board.on_board(), before.on_board() - bursts);
                        assert_eq!(board.supply(), before.supply() - 1 + recovered);
                    }
                    Placement::Rejected => panic!("legal move rejected on seed {}", seed),
                }
                assert!(board.cells().iter().all(|&v| v <= MAX_FILL));
                let occupied = board.cells().iter().filter(|&&v| v > 0).count() as u32;
                assert_eq!(board.on_board(), occupied);
            }
        }
    }

    #[test]
    fn test_display_board_formatting() {
        let board = board_from_rows(4, &["100004"]).unwrap();
        let rendered = board.to_string_with_highlight(Some(5));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "   1  2  3  4  5  6 ");
        assert_eq!(lines[1], "1  1  .  .  .  . [4]");
        assert_eq!(lines.last(), Some(&"drops in hand: 4"));
        assert_eq!(format!("{}", board), board.to_string_with_highlight(None));
    }

    #[test]
    fn test_record_string() {
        let board = board_from_rows(9, &["103233", "202140", "301440", "121040", "333321", "022432"])
            .unwrap();
        assert_eq!(
            board.to_record_string(),
            "9\n103233\n202140\n301440\n121040\n333321\n022432\n"
        );
    }

    #[test]
    fn test_every_move_lowers_potential() {
        let mut board = board_from_rows(5, &["434421", "040302", "441000"]).unwrap();
        for cell in [8, 0, 3, 2, 12, 13, 4] {
            let before = board.potential();
            if board.play(cell).is_applied() {
                assert!(board.potential() < before, "cell {} kept potential {}", cell, before);
            }
        }
    }

    #[test]
    fn test_huge_supply_saturates() {
        let mut board = board_from_rows(u32::MAX, &["444000"]).unwrap();
        assert_eq!(board.potential(), u32::MAX);
        assert!(board.play(0).is_burst());
        assert!(board.is_cleared());
        assert_eq!(board.supply(), u32::MAX);
    }
}
