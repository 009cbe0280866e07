use crate::ai::{LearningAgent, Participant, RandomAgent};
use crate::controller::{Controller, GameEnd};
use crate::training::evaluation;
use crate::training::metrics::{EpisodeResult, TrainingMetrics};

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_games: usize,
    pub log_interval: usize,
    /// Greedy games against a random opponent after training; 0 skips the
    /// evaluation.
    pub eval_games: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_games: 1000,
            log_interval: 100,
            eval_games: 0,
        }
    }
}

/// Summary of one training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    pub first_eval_win_rate: Option<f32>,
    pub second_eval_win_rate: Option<f32>,
}

/// Self-play trainer for a pair of learning agents.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Run `num_games` independent games, `first` always opening.
    pub fn train(&self, first: &mut LearningAgent, second: &mut LearningAgent) -> TrainingReport {
        let total = self.config.num_games;
        let window = self.config.log_interval.max(1);
        let mut metrics = TrainingMetrics::with_capacity(window);

        log::info!(
            "starting self-play training for {} games ({} vs {})",
            total,
            first.name(),
            second.name()
        );

        {
            let mut controller = Controller::new(first, second);
            for game in 1..=total {
                match controller.play_game() {
                    GameEnd::Finished(outcome) => metrics.record_episode(EpisodeResult {
                        outcome,
                        game_length: controller.state().moves_played(),
                    }),
                    GameEnd::Abandoned => log::warn!("game {} was abandoned", game),
                }
                controller.reset();

                if game % window == 0 {
                    log::info!(
                        "game {}/{} | X win: {:.1}% | O win: {:.1}% | draw: {:.1}% | avg_len: {:.1}",
                        game,
                        total,
                        metrics.first_win_rate(window) * 100.0,
                        metrics.second_win_rate(window) * 100.0,
                        metrics.draw_rate(window) * 100.0,
                        metrics.average_game_length(window),
                    );
                }
            }
        }

        let (first_wins, second_wins, draws) = metrics.totals();
        log::info!(
            "training complete: {} games, {} / {} positions known",
            metrics.total_episodes(),
            first.values().len(),
            second.values().len()
        );

        let (first_eval_win_rate, second_eval_win_rate) = if self.config.eval_games > 0 {
            let mut random = RandomAgent::new();
            let first_rate = evaluation::evaluate(first, self.config.eval_games, &mut random);
            let second_rate = evaluation::evaluate(second, self.config.eval_games, &mut random);
            log::info!(
                "eval vs random ({} games): {} {:.1}% | {} {:.1}%",
                self.config.eval_games,
                first.name(),
                first_rate * 100.0,
                second.name(),
                second_rate * 100.0
            );
            (Some(first_rate), Some(second_rate))
        } else {
            (None, None)
        };

        TrainingReport {
            games: metrics.total_episodes(),
            first_wins,
            second_wins,
            draws,
            first_eval_win_rate,
            second_eval_win_rate,
        }
    }
}
