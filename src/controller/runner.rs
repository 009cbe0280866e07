use crate::ai::{Decision, Participant};
use crate::controller::rewards::RewardPolicy;
use crate::error::MoveError;
use crate::game::{GameState, Outcome, Phase, Player};

/// Result of asking the active participant for one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Played(Phase),
    Abandoned,
}

/// How a game driven by [`Controller::play_game`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Finished(Outcome),
    Abandoned,
}

/// Runs games between two seated participants.
///
/// The first participant plays `X` and always opens; each participant is
/// told its symbol when seated. Rewards are handed out once, when a move
/// ends the game.
pub struct Controller<'a> {
    state: GameState,
    seats: [&'a mut dyn Participant; 2],
    rewards: RewardPolicy,
}

impl<'a> Controller<'a> {
    pub fn new(first: &'a mut dyn Participant, second: &'a mut dyn Participant) -> Self {
        let rewards = RewardPolicy::for_seats(first.kind(), second.kind());
        first.assign(Player::X);
        second.assign(Player::O);
        let mut controller = Controller {
            state: GameState::initial(),
            seats: [first, second],
            rewards,
        };
        controller.reset();
        controller
    }

    pub fn with_reward_policy(mut self, rewards: RewardPolicy) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn reward_policy(&self) -> RewardPolicy {
        self.rewards
    }

    pub fn participant(&self, player: Player) -> &dyn Participant {
        &*self.seats[seat_of(player)]
    }

    /// Apply `column` for the participant whose turn it is.
    pub fn submit(&mut self, column: usize) -> Result<Phase, MoveError> {
        let mover = self.state.current_player();
        let phase = self.state.apply_move_mut(column)?;

        let fingerprint = self.state.fingerprint();
        self.seats[seat_of(mover)].record_visited(fingerprint);

        if let Phase::Terminal(outcome) = phase {
            log::debug!(
                "game over after {} moves: {:?}",
                self.state.moves_played(),
                outcome
            );
            self.dispatch_rewards(outcome);
        }
        Ok(phase)
    }

    /// Ask the active participant for a move until one applies or it
    /// abandons. Does nothing once the game is decided.
    pub fn play_turn(&mut self) -> Turn {
        if self.state.is_terminal() {
            return Turn::Played(self.state.phase());
        }

        let seat = seat_of(self.state.current_player());
        loop {
            let legal = self.state.legal_actions();
            match self.seats[seat].choose_action(&legal, self.state.board()) {
                Decision::Abandon => {
                    log::debug!("{} abandoned the game", self.seats[seat].name());
                    self.abandon();
                    return Turn::Abandoned;
                }
                Decision::Drop(column) => match self.submit(column) {
                    Ok(phase) => return Turn::Played(phase),
                    Err(e) => {
                        log::debug!(
                            "rejected move {} from {}: {}",
                            column,
                            self.seats[seat].name(),
                            e
                        );
                        self.seats[seat].on_rejected(column, &e);
                    }
                },
            }
        }
    }

    /// Play the current game to the end.
    pub fn play_game(&mut self) -> GameEnd {
        loop {
            match self.play_turn() {
                Turn::Played(Phase::Terminal(outcome)) => return GameEnd::Finished(outcome),
                Turn::Played(Phase::InProgress) => {}
                Turn::Abandoned => return GameEnd::Abandoned,
            }
        }
    }

    /// Drop the current game without rewards.
    pub fn abandon(&mut self) {
        self.reset();
    }

    /// Fresh board, X to move, and both participants' traces cleared.
    pub fn reset(&mut self) {
        self.state.reset();
        for seat in self.seats.iter_mut() {
            seat.reset_episode();
        }
    }

    fn dispatch_rewards(&mut self, outcome: Outcome) {
        if let Some((first, second)) = self.rewards.rewards(outcome) {
            self.seats[0].apply_reward(first);
            self.seats[1].apply_reward(second);
        }
    }
}

fn seat_of(player: Player) -> usize {
    match player {
        Player::X => 0,
        Player::O => 1,
    }
}
