use std::path::PathBuf;

use crate::game::RuleKind;

/// Errors raised by the board when a drop or a read cannot be honoured.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of bounds (board has {width} columns)")]
    ColumnOutOfBounds { column: usize, width: usize },

    #[error("cell ({row}, {column}) is out of bounds for a {height}x{width} board")]
    CellOutOfBounds {
        row: usize,
        column: usize,
        height: usize,
        width: usize,
    },
}

impl BoardError {
    /// True for both out-of-bounds variants: these are caller contract
    /// violations rather than ordinary user input.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            BoardError::ColumnOutOfBounds { .. } | BoardError::CellOutOfBounds { .. }
        )
    }
}

/// Errors returned when a column selection is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("the round is over; start a new round to keep playing")]
    RoundOver,
}

/// Errors returned when a rule toggle is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("cannot change {kind} once a piece has been placed this round")]
    Locked { kind: RuleKind },

    #[error("{kind} is a base rule and is always enabled")]
    BaseRule { kind: RuleKind },
}

/// A `--moves` entry that is neither a column number nor `n`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid replay step '{0}': expected a column number or 'n'")]
pub struct ParseStepError(pub String);

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
