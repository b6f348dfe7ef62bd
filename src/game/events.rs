use super::{Player, Position, RuleKind, RuleSet};

/// How a round finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won(Player),
    Tied,
}

/// Notifications queued by the round controller for the display layer,
/// delivered in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PiecePlaced { position: Position, player: Player },
    TurnChanged(Player),
    RoundEnded(RoundOutcome),
    ColumnFullRejection { column: usize },
    RuleSetLockedRejection(RuleKind),
    /// A column was selected after the round had already ended.
    RoundOverRejection,
    RulesChanged(RuleSet),
    RoundStarted { round: u32 },
    /// Scores were zeroed for a new pair of players.
    SessionStarted,
}
