//! Core Connect Four rules: board, players, win-condition families, and the
//! round controller that drives turns and scoring across rounds.

mod board;
mod events;
mod player;
mod round;
mod rules;
pub mod win;

pub use board::{Board, Cell, Position, DEFAULT_COLS, DEFAULT_ROWS};
pub use events::{GameEvent, RoundOutcome};
pub use player::Player;
pub use round::{MoveOutcome, RoundController, RoundState, RoundStatus, ScoreBoard};
pub use rules::{RuleKind, RuleSet};
pub use win::WinningLine;
