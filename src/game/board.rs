use std::fmt;

use super::Player;
use crate::error::BoardError;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A cell coordinate. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Position { row, column }
    }
}

/// The grid of pieces. Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board of the default 6x7 size
    pub fn new() -> Self {
        Self::with_size(DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// Create an empty board with `height` rows and `width` columns.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero. Configuration is validated before
    /// it gets here.
    pub fn with_size(height: usize, width: usize) -> Self {
        assert!(height > 0 && width > 0, "board dimensions must be non-zero");
        Board {
            height,
            width,
            cells: vec![Cell::Empty; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Bounds-checked read. Row 0 is the top, row `height - 1` the bottom.
    pub fn cell_at(&self, row: usize, column: usize) -> Result<Cell, BoardError> {
        self.get(row, column).ok_or(BoardError::CellOutOfBounds {
            row,
            column,
            height: self.height,
            width: self.width,
        })
    }

    /// Read a cell, `None` when the coordinate is off the board
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        if row < self.height && column < self.width {
            Some(self.cells[row * self.width + column])
        } else {
            None
        }
    }

    /// Check if a column is full. Columns off the board count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        match self.get(0, column) {
            Some(cell) => !cell.is_empty(),
            None => true,
        }
    }

    /// Drop a piece in a column, returns the position where it landed
    pub fn drop_piece(&mut self, column: usize, player: Player) -> Result<Position, BoardError> {
        if column >= self.width {
            return Err(BoardError::ColumnOutOfBounds {
                column,
                width: self.width,
            });
        }

        // Lowest empty row wins
        for row in (0..self.height).rev() {
            let idx = row * self.width + column;
            if self.cells[idx].is_empty() {
                self.cells[idx] = Cell::Occupied(player);
                return Ok(Position { row, column });
            }
        }

        Err(BoardError::ColumnFull { column })
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// The four corner cells: top-left, bottom-left, bottom-right, top-right.
    pub fn corners(&self) -> [Position; 4] {
        let bottom = self.height - 1;
        let right = self.width - 1;
        [
            Position::new(0, 0),
            Position::new(bottom, 0),
            Position::new(bottom, right),
            Position::new(0, right),
        ]
    }

    /// Clear every cell
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.width).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                match cell {
                    Cell::Empty => f.write_str(".")?,
                    Cell::Occupied(player) => write!(f, "{}", player.number())?,
                }
            }
        }
        Ok(())
    }
}
