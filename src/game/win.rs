//! Board-wide win detection.
//!
//! Every cell is tried as the anchor of every enabled pattern. Patterns that
//! reach off the board are simply not wins, so no anchor needs special
//! casing (the square anchored on row 0 reaches row -1, for instance).

use tracing::{instrument, trace};

use super::{Board, Cell, Player, Position, RuleKind, RuleSet};

/// The pattern that completed a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub kind: RuleKind,
    pub cells: [Position; 4],
}

impl WinningLine {
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }
}

/// (row, column) offsets from the anchor cell. `None` for patterns that do
/// not depend on an anchor.
fn offsets(kind: RuleKind) -> Option<[(isize, isize); 4]> {
    match kind {
        RuleKind::Horizontal => Some([(0, 0), (0, 1), (0, 2), (0, 3)]),
        RuleKind::Vertical => Some([(0, 0), (1, 0), (2, 0), (3, 0)]),
        RuleKind::DiagonalDownRight => Some([(0, 0), (1, 1), (2, 2), (3, 3)]),
        RuleKind::DiagonalDownLeft => Some([(0, 0), (1, -1), (2, -2), (3, -3)]),
        // Anchor is the bottom-left cell of the block
        RuleKind::Square => Some([(0, 0), (-1, 0), (-1, 1), (0, 1)]),
        RuleKind::FourCorners => None,
    }
}

/// Absolute cells of a pattern, or `None` if any would have a negative index.
/// Cells past the far edges are left for `owns_all` to reject.
fn resolve(anchor: Position, offsets: [(isize, isize); 4]) -> Option<[Position; 4]> {
    let mut cells = [anchor; 4];
    for (cell, (dr, dc)) in cells.iter_mut().zip(offsets) {
        *cell = Position::new(
            anchor.row.checked_add_signed(dr)?,
            anchor.column.checked_add_signed(dc)?,
        );
    }
    Some(cells)
}

fn owns_all(board: &Board, cells: &[Position; 4], player: Player) -> bool {
    cells
        .iter()
        .all(|p| board.get(p.row, p.column) == Some(Cell::Occupied(player)))
}

/// Find a winning pattern for `player` under `rules`, if one exists.
///
/// The result depends only on the board contents, the rule set and the
/// player. Four corners is checked first since it has no anchor; after that
/// cells are scanned row-major with patterns in [`RuleKind::ALL`] order.
#[instrument(level = "trace", skip(board))]
pub fn find_win(board: &Board, rules: &RuleSet, player: Player) -> Option<WinningLine> {
    if rules.is_enabled(RuleKind::FourCorners) {
        let cells = board.corners();
        if owns_all(board, &cells, player) {
            return Some(WinningLine {
                kind: RuleKind::FourCorners,
                cells,
            });
        }
    }

    for row in 0..board.height() {
        for column in 0..board.width() {
            let anchor = Position::new(row, column);
            for kind in rules.enabled() {
                let Some(cells) = offsets(kind).and_then(|o| resolve(anchor, o)) else {
                    continue;
                };
                if owns_all(board, &cells, player) {
                    trace!(?kind, ?anchor, "winning pattern found");
                    return Some(WinningLine { kind, cells });
                }
            }
        }
    }

    None
}

/// Whether `player` has any winning pattern on the board.
pub fn is_win(board: &Board, rules: &RuleSet, player: Player) -> bool {
    find_win(board, rules, player).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_square() -> RuleSet {
        RuleSet {
            square: true,
            four_corners: false,
        }
    }

    fn with_corners() -> RuleSet {
        RuleSet {
            square: false,
            four_corners: true,
        }
    }

    #[test]
    fn test_empty_board_has_no_win() {
        let board = Board::new();
        let all = RuleSet {
            square: true,
            four_corners: true,
        };
        assert!(!is_win(&board, &all, Player::P1));
        assert!(!is_win(&board, &all, Player::P2));
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 0..4 {
            board.drop_piece(col, Player::P1).unwrap();
        }
        let line = find_win(&board, &RuleSet::base(), Player::P1).unwrap();
        assert_eq!(line.kind, RuleKind::Horizontal);
        assert!(line.contains(Position::new(5, 0)));
        assert!(line.contains(Position::new(5, 3)));
        assert!(!is_win(&board, &RuleSet::base(), Player::P2));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        for _ in 0..4 {
            board.drop_piece(3, Player::P2).unwrap();
        }
        let line = find_win(&board, &RuleSet::base(), Player::P2).unwrap();
        assert_eq!(line.kind, RuleKind::Vertical);
        assert_eq!(line.cells[0], Position::new(2, 3));
    }

    #[test]
    fn test_diagonal_down_left_win() {
        let mut board = Board::new();
        // Rising to the right: /
        board.drop_piece(0, Player::P1).unwrap();

        board.drop_piece(1, Player::P2).unwrap();
        board.drop_piece(1, Player::P1).unwrap();

        board.drop_piece(2, Player::P2).unwrap();
        board.drop_piece(2, Player::P2).unwrap();
        board.drop_piece(2, Player::P1).unwrap();

        board.drop_piece(3, Player::P2).unwrap();
        board.drop_piece(3, Player::P2).unwrap();
        board.drop_piece(3, Player::P2).unwrap();
        assert!(!is_win(&board, &RuleSet::base(), Player::P1));
        board.drop_piece(3, Player::P1).unwrap();

        let line = find_win(&board, &RuleSet::base(), Player::P1).unwrap();
        assert_eq!(line.kind, RuleKind::DiagonalDownLeft);
        assert_eq!(line.cells[0], Position::new(2, 3));
    }

    #[test]
    fn test_diagonal_down_right_win() {
        let mut board = Board::new();
        // Falling to the right: \
        board.drop_piece(6, Player::P1).unwrap();

        board.drop_piece(5, Player::P2).unwrap();
        board.drop_piece(5, Player::P1).unwrap();

        board.drop_piece(4, Player::P2).unwrap();
        board.drop_piece(4, Player::P2).unwrap();
        board.drop_piece(4, Player::P1).unwrap();

        board.drop_piece(3, Player::P2).unwrap();
        board.drop_piece(3, Player::P2).unwrap();
        board.drop_piece(3, Player::P2).unwrap();
        board.drop_piece(3, Player::P1).unwrap();

        let line = find_win(&board, &RuleSet::base(), Player::P1).unwrap();
        assert_eq!(line.kind, RuleKind::DiagonalDownRight);
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, Player::P1).unwrap();
        }
        assert!(!is_win(&board, &RuleSet::base(), Player::P1));
    }

    #[test]
    fn test_horizontal_does_not_wrap_rows() {
        let mut board = Board::new();
        // Columns 5, 6 on the bottom row and 0, 1 one row up are not a line
        board.drop_piece(5, Player::P1).unwrap();
        board.drop_piece(6, Player::P1).unwrap();
        board.drop_piece(0, Player::P2).unwrap();
        board.drop_piece(1, Player::P2).unwrap();
        board.drop_piece(0, Player::P1).unwrap();
        board.drop_piece(1, Player::P1).unwrap();
        assert!(!is_win(&board, &RuleSet::base(), Player::P1));
    }

    #[test]
    fn test_square_requires_rule() {
        let mut board = Board::new();
        for col in 0..2 {
            board.drop_piece(col, Player::P1).unwrap();
            board.drop_piece(col, Player::P1).unwrap();
        }
        assert!(!is_win(&board, &RuleSet::base(), Player::P1));

        let line = find_win(&board, &with_square(), Player::P1).unwrap();
        assert_eq!(line.kind, RuleKind::Square);
        assert_eq!(
            line.cells,
            [
                Position::new(5, 0),
                Position::new(4, 0),
                Position::new(4, 1),
                Position::new(5, 1),
            ]
        );
    }

    #[test]
    fn test_square_on_top_rows() {
        let mut board = Board::with_size(2, 2);
        for col in 0..2 {
            board.drop_piece(col, Player::P2).unwrap();
            board.drop_piece(col, Player::P2).unwrap();
        }
        // Anchors on row 0 reach row -1 and must not fault
        assert!(is_win(&board, &with_square(), Player::P2));
    }

    #[test]
    fn test_four_corners() {
        let mut board = Board::new();
        for col in [0, 6] {
            board.drop_piece(col, Player::P1).unwrap();
            for _ in 0..4 {
                board.drop_piece(col, Player::P2).unwrap();
            }
            board.drop_piece(col, Player::P1).unwrap();
        }
        assert!(!is_win(&board, &RuleSet::base(), Player::P1));

        let line = find_win(&board, &with_corners(), Player::P1).unwrap();
        assert_eq!(line.kind, RuleKind::FourCorners);
        assert_eq!(line.cells, board.corners());
    }

    #[test]
    fn test_four_corners_scales_with_board() {
        let mut board = Board::with_size(4, 5);
        for col in [0, 4] {
            board.drop_piece(col, Player::P2).unwrap();
            board.drop_piece(col, Player::P1).unwrap();
            board.drop_piece(col, Player::P1).unwrap();
            board.drop_piece(col, Player::P2).unwrap();
        }
        let line = find_win(&board, &with_corners(), Player::P2).unwrap();
        assert_eq!(line.kind, RuleKind::FourCorners);
        assert!(line.contains(Position::new(3, 4)));
    }

    #[test]
    fn test_mixed_owners_not_a_win() {
        let mut board = Board::new();
        board.drop_piece(0, Player::P1).unwrap();
        board.drop_piece(1, Player::P1).unwrap();
        board.drop_piece(2, Player::P2).unwrap();
        board.drop_piece(3, Player::P1).unwrap();
        assert!(!is_win(&board, &RuleSet::base(), Player::P1));
    }
}
