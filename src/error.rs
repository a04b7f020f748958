use thiserror::Error;

/// Problems found while reading a board description.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing drops-in-hand line")]
    MissingSupply,

    #[error("invalid drops-in-hand count '{0}'")]
    InvalidSupply(String),

    #[error("invalid number of rows. Expected {expected}, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized character '{ch}' in row {row} col {col}, expected a digit 0-{max}")]
    InvalidCell {
        ch: char,
        row: usize,
        col: usize,
        max: u8,
    },
}

/// Errors surfaced to the binaries.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid board: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
