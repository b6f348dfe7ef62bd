//! Headless play: feed a list of columns through a controller and print what
//! happens. An `n` in the list starts the next round, so one replay can
//! cover several rounds of a session.

use std::io::{self, Write};
use std::str::FromStr;

use crate::error::ParseStepError;
use crate::game::{GameEvent, Player, RoundController, RoundOutcome};

/// One entry of a replay script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStep {
    /// Select a 0-based column.
    Column(usize),
    /// Start the next round, keeping the scores.
    NewRound,
}

impl FromStr for ReplayStep {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "n" | "N" => Ok(ReplayStep::NewRound),
            other => other
                .parse()
                .map(ReplayStep::Column)
                .map_err(|_| ParseStepError(s.to_string())),
        }
    }
}

/// Run `steps` in order, writing every event, the final board and the
/// score to `out`. Rejected selections are reported and skipped.
pub fn replay<W: Write>(
    controller: &mut RoundController,
    steps: &[ReplayStep],
    out: &mut W,
) -> io::Result<()> {
    write_events(controller, out)?;
    for &step in steps {
        match step {
            ReplayStep::Column(column) => {
                if let Err(err) = controller.select_column(column) {
                    writeln!(out, "rejected column {column}: {err}")?;
                }
            }
            ReplayStep::NewRound => controller.start_new_round(),
        }
        write_events(controller, out)?;
    }

    writeln!(out, "{}", controller.board())?;
    let score = controller.score_board();
    writeln!(
        out,
        "score: player 1 {}, player 2 {}, ties {}",
        score.wins(Player::P1),
        score.wins(Player::P2),
        score.ties
    )?;
    Ok(())
}

fn write_events<W: Write>(controller: &mut RoundController, out: &mut W) -> io::Result<()> {
    for event in controller.drain_events() {
        match event {
            GameEvent::PiecePlaced { position, player } => writeln!(
                out,
                "{player} -> row {}, column {}",
                position.row, position.column
            )?,
            GameEvent::TurnChanged(player) => writeln!(out, "turn: {player}")?,
            GameEvent::RoundEnded(RoundOutcome::Won(player)) => writeln!(out, "{player} wins")?,
            GameEvent::RoundEnded(RoundOutcome::Tied) => writeln!(out, "tie")?,
            GameEvent::RoundStarted { round } => writeln!(out, "round {round}")?,
            // Rejections are reported from the returned error
            GameEvent::ColumnFullRejection { .. }
            | GameEvent::RoundOverRejection
            | GameEvent::RuleSetLockedRejection(_) => {}
            GameEvent::RulesChanged(rules) => writeln!(
                out,
                "rules: square={} four_corners={}",
                rules.square, rules.four_corners
            )?,
            GameEvent::SessionStarted => writeln!(out, "new session")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(columns: &[usize]) -> String {
        let steps: Vec<_> = columns.iter().map(|&c| ReplayStep::Column(c)).collect();
        run_steps(&steps)
    }

    fn run_steps(steps: &[ReplayStep]) -> String {
        let mut controller = RoundController::new();
        let mut out = Vec::new();
        replay(&mut controller, steps, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_replay_reports_win() {
        let output = run(&[3, 4, 3, 4, 3, 4, 3]);
        assert!(output.starts_with("round 1\nPlayer 1 -> row 5, column 3\nturn: Player 2\n"));
        assert!(output.contains("Player 1 wins\n"));
        assert!(output.ends_with("score: player 1 1, player 2 0, ties 0\n"));
    }

    #[test]
    fn test_replay_continues_after_rejection() {
        let output = run(&[9, 0]);
        assert!(output.contains("rejected column 9: column 9 is out of bounds (board has 7 columns)\n"));
        assert!(output.contains("Player 1 -> row 5, column 0\n"));
    }

    #[test]
    fn test_replay_prints_board() {
        let output = run(&[0, 6]);
        assert!(output.contains("1 . . . . . 2\n"));
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!("3".parse::<ReplayStep>(), Ok(ReplayStep::Column(3)));
        assert_eq!("n".parse::<ReplayStep>(), Ok(ReplayStep::NewRound));
        let err = "x".parse::<ReplayStep>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid replay step 'x': expected a column number or 'n'"
        );
    }

    #[test]
    fn test_replay_across_rounds_keeps_score() {
        let mut steps: Vec<ReplayStep> = [3, 4, 3, 4, 3, 4, 3]
            .into_iter()
            .map(ReplayStep::Column)
            .collect();
        steps.push(ReplayStep::NewRound);
        // P2 wins the second round in column 4
        steps.extend([0, 4, 1, 4, 0, 4, 1, 4].into_iter().map(ReplayStep::Column));

        let output = run_steps(&steps);
        assert!(output.contains("round 2\n"));
        assert!(output.contains("Player 2 wins\n"));
        assert!(!output.contains("rejected"));
        assert!(output.ends_with("score: player 1 1, player 2 1, ties 0\n"));
    }
}
