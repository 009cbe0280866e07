//! Core game logic: board representation, win detection, and the per-game
//! state machine.

mod board;
pub mod detector;
mod player;
mod state;

pub use board::{Board, Cell, Fingerprint, COLS, ROWS};
pub use detector::Outcome;
pub use player::Player;
pub use state::{GameState, Phase};

/// A complete game that fills the board without anyone connecting four.
#[cfg(test)]
pub(crate) const DRAWN_GAME: [usize; 42] = [
    5, 4, 5, 0, 6, 2, 4, 5, 5, 0, 4, 1, 1, 0, 4, 5, 6, 5, 3, 1, 1, 2, 2, 6, 2, 6, 6, 3, 6, 2, 0,
    3, 0, 3, 3, 4, 3, 1, 4, 2, 1, 0,
];
