use super::board::Cell;

/// The two symbols on the board. `X` always belongs to the participant that
/// moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Sum of a four-cell run owned entirely by this player.
    pub fn winning_sum(self) -> i8 {
        4 * self.to_cell().value()
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::X.other(), Player::O);
        assert_eq!(Player::O.other(), Player::X);
    }

    #[test]
    fn test_winning_sum() {
        assert_eq!(Player::X.winning_sum(), 4);
        assert_eq!(Player::O.winning_sum(), -4);
    }
}
