use crate::ai::{LearningAgent, Participant, RandomAgent};
use crate::controller::{Controller, GameEnd, RewardPolicy};
use crate::game::Player;

/// Play a single evaluation game with the agent in its own seat. Nothing is
/// learned from it.
/// Returns Some(true) if the agent won, Some(false) if it lost, None if draw.
pub fn play_eval_game(agent: &mut LearningAgent, opponent: &mut dyn Participant) -> Option<bool> {
    let agent_player = agent.player();
    let end = {
        let mut controller = match agent_player {
            Player::X => Controller::new(agent, opponent),
            Player::O => Controller::new(opponent, agent),
        }
        .with_reward_policy(RewardPolicy::Frozen);
        controller.play_game()
    };

    match end {
        GameEnd::Finished(outcome) => outcome.winner().map(|winner| winner == agent_player),
        GameEnd::Abandoned => None,
    }
}

/// Greedy win rate of the agent against a uniform-random opponent.
pub fn evaluate(agent: &mut LearningAgent, eval_games: usize, opponent: &mut RandomAgent) -> f32 {
    if eval_games == 0 {
        return 0.0;
    }

    let saved_rate = agent.exploration_rate();
    agent.set_exploration_rate(0.0);

    let mut wins = 0;
    for _ in 0..eval_games {
        if let Some(true) = play_eval_game(agent, &mut *opponent) {
            wins += 1;
        }
    }

    agent.reset_episode();
    agent.set_exploration_rate(saved_rate);
    wins as f32 / eval_games as f32
}
