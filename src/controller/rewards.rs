use crate::ai::ParticipantKind;
use crate::game::Outcome;

/// How a finished game is turned into rewards for the two seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardPolicy {
    /// Two agents training against each other.
    SelfPlay,
    /// One seat is a human. Losing costs the first seat less than in
    /// self-play.
    HumanOpponent,
    /// No rewards at all; used when measuring an agent.
    Frozen,
}

impl RewardPolicy {
    /// Policy implied by who is sitting at the board.
    pub fn for_seats(first: ParticipantKind, second: ParticipantKind) -> Self {
        if first == ParticipantKind::External || second == ParticipantKind::External {
            RewardPolicy::HumanOpponent
        } else {
            RewardPolicy::SelfPlay
        }
    }

    /// Rewards for (first seat, second seat), or `None` when nothing is
    /// handed out.
    pub fn rewards(self, outcome: Outcome) -> Option<(f64, f64)> {
        if self == RewardPolicy::Frozen {
            return None;
        }
        match outcome {
            Outcome::Win => Some((2.0, -2.0)),
            Outcome::Loss => match self {
                RewardPolicy::HumanOpponent => Some((-2.0, 2.0)),
                _ => Some((-4.0, 2.0)),
            },
            Outcome::Draw => Some((-1.0, 1.0)),
            Outcome::Ongoing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_play_rewards() {
        let policy = RewardPolicy::SelfPlay;
        assert_eq!(policy.rewards(Outcome::Win), Some((2.0, -2.0)));
        assert_eq!(policy.rewards(Outcome::Loss), Some((-4.0, 2.0)));
        assert_eq!(policy.rewards(Outcome::Draw), Some((-1.0, 1.0)));
        assert_eq!(policy.rewards(Outcome::Ongoing), None);
    }

    #[test]
    fn test_human_opponent_softens_loss_only() {
        let policy = RewardPolicy::HumanOpponent;
        assert_eq!(policy.rewards(Outcome::Win), Some((2.0, -2.0)));
        assert_eq!(policy.rewards(Outcome::Loss), Some((-2.0, 2.0)));
        assert_eq!(policy.rewards(Outcome::Draw), Some((-1.0, 1.0)));
    }

    #[test]
    fn test_frozen_hands_out_nothing() {
        for outcome in [Outcome::Win, Outcome::Loss, Outcome::Draw] {
            assert_eq!(RewardPolicy::Frozen.rewards(outcome), None);
        }
    }

    #[test]
    fn test_policy_from_seats() {
        use ParticipantKind::{Agent, External};
        assert_eq!(RewardPolicy::for_seats(Agent, Agent), RewardPolicy::SelfPlay);
        assert_eq!(RewardPolicy::for_seats(External, Agent), RewardPolicy::HumanOpponent);
        assert_eq!(RewardPolicy::for_seats(Agent, External), RewardPolicy::HumanOpponent);
    }
}
