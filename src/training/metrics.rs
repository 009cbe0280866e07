use std::collections::VecDeque;

use crate::game::Outcome;

/// Result of a single finished game.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeResult {
    pub outcome: Outcome,
    pub game_length: usize,
}

/// Training metrics tracker with rolling window computations.
pub struct TrainingMetrics {
    episode_results: VecDeque<EpisodeResult>,
    capacity: usize,
    total_episodes: usize, // lifetime count, never capped
    first_wins: usize,
    second_wins: usize,
    draws: usize,
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            episode_results: VecDeque::with_capacity(capacity),
            capacity,
            total_episodes: 0,
            first_wins: 0,
            second_wins: 0,
            draws: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_episode(&mut self, result: EpisodeResult) {
        self.total_episodes += 1;
        match result.outcome {
            Outcome::Win => self.first_wins += 1,
            Outcome::Loss => self.second_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => {}
        }
        self.episode_results.push_back(result);
        if self.episode_results.len() > self.capacity {
            self.episode_results.pop_front();
        }
    }

    fn rate_of(&self, last_n: usize, outcome: Outcome) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .filter(|r| r.outcome == outcome)
            .count();
        hits as f32 / n as f32
    }

    /// Win rate of the first-moving seat in the last N games.
    pub fn first_win_rate(&self, last_n: usize) -> f32 {
        self.rate_of(last_n, Outcome::Win)
    }

    /// Win rate of the second seat in the last N games.
    pub fn second_win_rate(&self, last_n: usize) -> f32 {
        self.rate_of(last_n, Outcome::Loss)
    }

    /// Draw rate in the last N games.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate_of(last_n, Outcome::Draw)
    }

    /// Average game length over the last N games.
    pub fn average_game_length(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .map(|r| r.game_length)
            .sum();
        total as f32 / n as f32
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    /// Lifetime (first wins, second wins, draws).
    pub fn totals(&self) -> (usize, usize, usize) {
        (self.first_wins, self.second_wins, self.draws)
    }
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}
