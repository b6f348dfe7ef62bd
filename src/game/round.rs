use std::collections::VecDeque;

use tracing::{debug, info, instrument, warn};

use super::events::{GameEvent, RoundOutcome};
use super::win::{self, WinningLine};
use super::{Board, Cell, Player, Position, RuleKind, RuleSet};
use crate::error::{BoardError, MoveError, RuleError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won(Player),
    Tied,
}

impl RoundStatus {
    pub fn is_terminal(self) -> bool {
        self != RoundStatus::InProgress
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    pub current_player: Player,
    pub status: RoundStatus,
    pub move_count: usize,
}

impl RoundState {
    fn start() -> Self {
        RoundState {
            current_player: Player::P1,
            status: RoundStatus::InProgress,
            move_count: 0,
        }
    }
}

/// Cumulative results for the current pair of players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub p1_wins: u32,
    pub p2_wins: u32,
    pub ties: u32,
}

impl ScoreBoard {
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::P1 => self.p1_wins,
            Player::P2 => self.p2_wins,
        }
    }

    fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Won(Player::P1) => self.p1_wins += 1,
            RoundOutcome::Won(Player::P2) => self.p2_wins += 1,
            RoundOutcome::Tied => self.ties += 1,
        }
    }
}

/// Result of an accepted column selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub position: Position,
    pub player: Player,
    pub status: RoundStatus,
}

/// Owns the board, round state and scores of one session, and is the only
/// thing that mutates them.
///
/// Input arrives through [`select_column`](Self::select_column), the rule
/// toggles and the round/session resets. Every change is also queued as a
/// [`GameEvent`] for the display layer to pick up with
/// [`drain_events`](Self::drain_events).
#[derive(Debug, Clone)]
pub struct RoundController {
    board: Board,
    rules: RuleSet,
    default_rules: RuleSet,
    state: RoundState,
    score: ScoreBoard,
    round: u32,
    winning_line: Option<WinningLine>,
    events: VecDeque<GameEvent>,
}

impl RoundController {
    /// Standard 6x7 board with only the base rules
    pub fn new() -> Self {
        Self::with_board(Board::new(), RuleSet::base())
    }

    /// Start a session on `board` with `rules` as the session default.
    pub fn with_board(mut board: Board, rules: RuleSet) -> Self {
        board.reset();
        let mut controller = RoundController {
            board,
            rules,
            default_rules: rules,
            state: RoundState::start(),
            score: ScoreBoard::default(),
            round: 1,
            winning_line: None,
            events: VecDeque::new(),
        };
        controller
            .events
            .push_back(GameEvent::RoundStarted { round: 1 });
        controller
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, row: usize, column: usize) -> Result<Cell, BoardError> {
        self.board.cell_at(row, column)
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    pub fn round_state(&self) -> RoundState {
        self.state
    }

    pub fn score_board(&self) -> ScoreBoard {
        self.score
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /// 1-based number of the current round within the session
    pub fn round_number(&self) -> u32 {
        self.round
    }

    /// The pattern that won the round, if it was won.
    pub fn winning_line(&self) -> Option<&WinningLine> {
        self.winning_line.as_ref()
    }

    /// Rules freeze once the first piece of the round is down.
    pub fn rules_locked(&self) -> bool {
        self.state.move_count > 0
    }

    /// Play the current player's piece into `column`.
    ///
    /// A full or out-of-range column leaves every piece of state untouched,
    /// as does a selection after the round has ended.
    #[instrument(skip(self), fields(player = ?self.state.current_player))]
    pub fn select_column(&mut self, column: usize) -> Result<MoveOutcome, MoveError> {
        if self.state.status.is_terminal() {
            debug!("column selected after the round ended");
            self.events.push_back(GameEvent::RoundOverRejection);
            return Err(MoveError::RoundOver);
        }

        let player = self.state.current_player;
        let position = match self.board.drop_piece(column, player) {
            Ok(position) => position,
            Err(err) => {
                match &err {
                    BoardError::ColumnFull { column } => {
                        debug!(column, "column is full");
                        self.events
                            .push_back(GameEvent::ColumnFullRejection { column: *column });
                    }
                    _ => warn!(%err, "rejected column selection"),
                }
                return Err(err.into());
            }
        };

        self.state.move_count += 1;
        self.events
            .push_back(GameEvent::PiecePlaced { position, player });

        if let Some(line) = win::find_win(&self.board, &self.rules, player) {
            info!(%player, kind = %line.kind, round = self.round, "round won");
            self.winning_line = Some(line);
            self.finish(RoundOutcome::Won(player));
        } else if self.board.is_full() {
            info!(round = self.round, "round tied");
            self.finish(RoundOutcome::Tied);
        } else {
            self.state.current_player = player.other();
            self.events
                .push_back(GameEvent::TurnChanged(self.state.current_player));
        }

        Ok(MoveOutcome {
            position,
            player,
            status: self.state.status,
        })
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        self.state.status = match outcome {
            RoundOutcome::Won(player) => RoundStatus::Won(player),
            RoundOutcome::Tied => RoundStatus::Tied,
        };
        self.score.record(outcome);
        self.events.push_back(GameEvent::RoundEnded(outcome));
    }

    /// Enable or disable a win condition. Only allowed before the first
    /// piece of the round is placed.
    #[instrument(skip(self))]
    pub fn set_rule_enabled(&mut self, kind: RuleKind, enabled: bool) -> Result<(), RuleError> {
        if self.rules_locked() {
            debug!("rule set is locked for this round");
            self.events
                .push_back(GameEvent::RuleSetLockedRejection(kind));
            return Err(RuleError::Locked { kind });
        }
        self.rules.set(kind, enabled)?;
        self.events.push_back(GameEvent::RulesChanged(self.rules));
        Ok(())
    }

    /// Clear the board for another round. Scores and rules carry over.
    #[instrument(skip(self))]
    pub fn start_new_round(&mut self) {
        self.board.reset();
        self.state = RoundState::start();
        self.winning_line = None;
        self.round += 1;
        info!(round = self.round, "new round");
        self.events
            .push_back(GameEvent::RoundStarted { round: self.round });
    }

    /// New players: zero the scores, restore the default rules and start
    /// again from round 1.
    #[instrument(skip(self))]
    pub fn start_new_session(&mut self) {
        self.score = ScoreBoard::default();
        self.rules = self.default_rules;
        self.round = 0;
        info!("new session");
        self.events.push_back(GameEvent::SessionStarted);
        self.start_new_round();
    }

    /// Queued events, oldest first
    pub fn pending_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Take every queued event, oldest first, leaving the queue empty.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new()
    }
}
