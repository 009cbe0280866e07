use crate::error::MoveError;

use super::detector::{self, Outcome};
use super::{Board, Fingerprint, Player};

/// Lifecycle of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Terminal(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    phase: Phase,
    moves_played: usize,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::X, // X starts
            phase: Phase::InProgress,
            moves_played: 0,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Outcome relative to X; `Ongoing` while the game is in progress.
    pub fn outcome(&self) -> Outcome {
        match self.phase {
            Phase::InProgress => Outcome::Ongoing,
            Phase::Terminal(outcome) => outcome,
        }
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Terminal(_))
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.board.fingerprint()
    }

    /// Apply a move for the current player in place.
    ///
    /// The turn passes to the other player only while the game goes on; once
    /// terminal, the mover stays current so callers can tell who finished it.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<Phase, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        self.board.apply_move(column, self.current_player)?;
        self.moves_played += 1;

        match detector::evaluate(&self.board) {
            Outcome::Ongoing => self.current_player = self.current_player.other(),
            outcome => self.phase = Phase::Terminal(outcome),
        }

        Ok(self.phase)
    }

    /// Back to an empty board with X to move.
    pub fn reset(&mut self) {
        *self = GameState::initial();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
