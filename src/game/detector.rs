//! Four-in-a-row detection by summing the encoded values of every
//! four-cell run that fits inside the grid.

use super::board::{Board, Cell, COLS, ROWS};
use super::player::Player;

/// Result of a position, seen from the side that moved first (`X`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    Ongoing,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    /// The player that connected four, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win => Some(Player::X),
            Outcome::Loss => Some(Player::O),
            Outcome::Draw | Outcome::Ongoing => None,
        }
    }
}

/// (row step, column step): vertical, horizontal, diagonal up-right,
/// diagonal down-right.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

/// Classify a board. Pure, so repeated calls without a move agree.
pub fn evaluate(board: &Board) -> Outcome {
    for row in 0..ROWS {
        for col in 0..COLS {
            if board.get(row, col) == Cell::Empty {
                continue;
            }
            for &(dr, dc) in &DIRECTIONS {
                match run_sum(board, row, col, dr, dc) {
                    Some(sum) if sum == Player::X.winning_sum() => return Outcome::Win,
                    Some(sum) if sum == Player::O.winning_sum() => return Outcome::Loss,
                    _ => {}
                }
            }
        }
    }

    if board.legal_columns().is_empty() {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

/// Whether `player` has four in a row anywhere on the board.
pub fn has_four(board: &Board, player: Player) -> bool {
    let target = player.winning_sum();
    (0..ROWS).any(|row| {
        (0..COLS).any(|col| {
            board.get(row, col) != Cell::Empty
                && DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| run_sum(board, row, col, dr, dc) == Some(target))
        })
    })
}

/// Sum of the four cells starting at (row, col) and stepping by (dr, dc),
/// or `None` when the run would leave the grid.
fn run_sum(board: &Board, row: usize, col: usize, dr: isize, dc: isize) -> Option<i8> {
    let end_row = row as isize + 3 * dr;
    let end_col = col as isize + 3 * dc;
    if end_row < 0 || end_row >= ROWS as isize || end_col < 0 || end_col >= COLS as isize {
        return None;
    }

    let sum = (0..4)
        .map(|i| {
            let r = (row as isize + i * dr) as usize;
            let c = (col as isize + i * dc) as usize;
            board.get(r, c).value()
        })
        .sum();
    Some(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from_moves(moves: &[(usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(col, player) in moves {
            board.apply_move(col, player).unwrap();
        }
        board
    }

    /// Full board with no four-in-a-row: rows follow X X O O X X and every
    /// other column is inverted.
    fn drawn_board() -> Board {
        let pattern = [Player::X, Player::X, Player::O, Player::O, Player::X, Player::X];
        let mut board = Board::new();
        for col in 0..COLS {
            for &row_player in &pattern {
                let player = if col % 2 == 0 { row_player } else { row_player.other() };
                board.apply_move(col, player).unwrap();
            }
        }
        board
    }

    #[test]
    fn test_empty_board_is_ongoing() {
        assert_eq!(evaluate(&Board::new()), Outcome::Ongoing);
    }

    #[test]
    fn test_horizontal_win_for_x() {
        let board = board_from_moves(&[
            (0, Player::X),
            (1, Player::X),
            (2, Player::X),
            (3, Player::X),
        ]);
        assert_eq!(evaluate(&board), Outcome::Win);
        assert!(has_four(&board, Player::X));
        assert!(!has_four(&board, Player::O));
    }

    #[test]
    fn test_vertical_win_for_o() {
        let board = board_from_moves(&[(6, Player::O); 4]);
        assert_eq!(evaluate(&board), Outcome::Loss);
        assert_eq!(evaluate(&board).winner(), Some(Player::O));
    }

    #[test]
    fn test_diagonal_up_right_win() {
        let board = board_from_moves(&[
            (0, Player::X),
            (1, Player::O),
            (1, Player::X),
            (2, Player::O),
            (2, Player::O),
            (2, Player::X),
            (3, Player::O),
            (3, Player::O),
            (3, Player::O),
            (3, Player::X),
        ]);
        assert_eq!(evaluate(&board), Outcome::Win);
    }

    #[test]
    fn test_diagonal_down_right_win() {
        let board = board_from_moves(&[
            (6, Player::O),
            (5, Player::X),
            (5, Player::O),
            (4, Player::X),
            (4, Player::X),
            (4, Player::O),
            (3, Player::X),
            (3, Player::X),
            (3, Player::X),
            (3, Player::O),
        ]);
        assert_eq!(evaluate(&board), Outcome::Loss);
    }

    #[test]
    fn test_stacking_one_column_is_not_a_win() {
        let board = board_from_moves(&[(3, Player::X); 3]);
        assert_eq!(evaluate(&board), Outcome::Ongoing);
    }

    #[test]
    fn test_three_in_a_row_is_not_a_win() {
        let board = board_from_moves(&[(0, Player::X), (1, Player::X), (2, Player::X)]);
        assert_eq!(evaluate(&board), Outcome::Ongoing);
        assert!(!has_four(&board, Player::X));
    }

    #[test]
    fn test_mixed_run_does_not_count() {
        let board = board_from_moves(&[
            (0, Player::X),
            (1, Player::X),
            (2, Player::O),
            (3, Player::X),
            (4, Player::X),
        ]);
        assert_eq!(evaluate(&board), Outcome::Ongoing);
    }

    #[test]
    fn test_full_board_without_four_is_draw() {
        let board = drawn_board();
        assert!(board.is_full());
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn test_win_found_wherever_the_run_sits() {
        // The same horizontal run slid along the bottom row must be found
        // every time, whichever cell the scan reaches first.
        for start in 0..=COLS - 4 {
            let moves: Vec<_> = (start..start + 4).map(|c| (c, Player::O)).collect();
            let board = board_from_moves(&moves);
            assert_eq!(evaluate(&board), Outcome::Loss, "run starting at {start}");
        }
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let board = board_from_moves(&[(2, Player::X); 4]);
        let first = evaluate(&board);
        for _ in 0..3 {
            assert_eq!(evaluate(&board), first);
        }
    }

    #[test]
    fn test_run_sum_respects_bounds() {
        let board = Board::new();
        assert_eq!(run_sum(&board, 0, 4, 0, 1), None);
        assert_eq!(run_sum(&board, 0, 3, 0, 1), Some(0));
        assert_eq!(run_sum(&board, 2, 0, -1, 1), None);
        assert_eq!(run_sum(&board, 3, 0, -1, 1), Some(0));
        assert_eq!(run_sum(&board, 3, 0, 1, 0), None);
    }
}
