use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    /// Player number as shown to humans (1 or 2)
    pub fn number(self) -> u8 {
        match self {
            Player::P1 => 1,
            Player::P2 => 2,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::P1 => "Player 1",
            Player::P2 => "Player 2",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
