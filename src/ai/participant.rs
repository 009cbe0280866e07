use crate::error::MoveError;
use crate::game::{Board, Fingerprint, Player};

/// What a participant wants to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Drop a piece in this column.
    Drop(usize),
    /// Leave the game. No rewards are handed out for an abandoned game.
    Abandon,
}

/// Who is behind a seat. Games with an external participant use the
/// human-opponent reward table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantKind {
    Agent,
    External,
}

/// Uniform interface for everything that can take a seat at the board.
///
/// Only `choose_action` and `name` are required. The learning hooks default
/// to no-ops so that humans and fixed opponents can ignore them.
pub trait Participant {
    /// Pick a move from `legal` (never empty) for the given position.
    fn choose_action(&mut self, legal: &[usize], board: &Board) -> Decision;

    /// Return the participant's display name.
    fn name(&self) -> &str;

    fn kind(&self) -> ParticipantKind {
        ParticipantKind::Agent
    }

    /// Called when the participant takes a seat; `player` is its symbol for
    /// every game at that seat.
    fn assign(&mut self, _player: Player) {}

    /// Called with the position reached right after this participant moved.
    fn record_visited(&mut self, _fingerprint: Fingerprint) {}

    /// Called once when a game this participant took part in is decided.
    fn apply_reward(&mut self, _reward: f64) {}

    /// Forget the positions recorded for the current game.
    fn reset_episode(&mut self) {}

    /// The proposed move could not be applied; the participant will be asked
    /// again.
    fn on_rejected(&mut self, _column: usize, _error: &MoveError) {}
}
