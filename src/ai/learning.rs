use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::participant::{Decision, Participant};
use crate::ai::value_table::ValueTable;
use crate::error::PolicyError;
use crate::game::{detector, Board, Fingerprint, Player};
use crate::policy::{PolicySnapshot, PolicyStore};

/// Tabular agent hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Probability of a uniformly random move once no immediate win or
    /// block is available.
    pub exploration_rate: f64,
    pub learning_rate: f64,
    pub discount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            exploration_rate: 0.4,
            learning_rate: 0.8,
            discount: 0.9,
            seed: None,
        }
    }
}

/// Value-table agent trained from the final result of each game.
pub struct LearningAgent {
    name: String,
    player: Player,
    values: ValueTable,
    trace: Vec<Fingerprint>,
    exploration_rate: f64,
    learning_rate: f64,
    discount: f64,
    games_trained: u64,
    rng: StdRng,
}

impl LearningAgent {
    pub fn new(name: impl Into<String>, player: Player, config: &AgentConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        LearningAgent {
            name: name.into(),
            player,
            values: ValueTable::new(),
            trace: Vec::new(),
            exploration_rate: config.exploration_rate,
            learning_rate: config.learning_rate,
            discount: config.discount,
            games_trained: 0,
            rng,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn set_exploration_rate(&mut self, exploration_rate: f64) {
        self.exploration_rate = exploration_rate;
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut ValueTable {
        &mut self.values
    }

    /// Positions recorded so far in the current game.
    pub fn trace(&self) -> &[Fingerprint] {
        &self.trace
    }

    pub fn games_trained(&self) -> u64 {
        self.games_trained
    }

    /// Pick a column: win now, else block, else explore, else the move
    /// leading to the most valuable known position.
    pub fn select_column(&mut self, legal: &[usize], board: &Board) -> usize {
        assert!(!legal.is_empty(), "No legal columns available");

        if let Some(col) = self.finishing_move(legal, board, self.player) {
            return col;
        }
        if let Some(col) = self.finishing_move(legal, board, self.player.other()) {
            return col;
        }

        if self.rng.random_range(0.0..1.0) < self.exploration_rate {
            let idx = self.rng.random_range(0..legal.len());
            return legal[idx];
        }

        // `>=` so the last column among equal values wins
        let mut best_col = legal[0];
        let mut best_value = f64::NEG_INFINITY;
        for &col in legal {
            let Ok(next) = board.with_move(col, self.player) else {
                continue;
            };
            let value = self.values.get(&next.fingerprint());
            if value >= best_value {
                best_value = value;
                best_col = col;
            }
        }
        best_col
    }

    /// First legal column where `player` would connect four.
    fn finishing_move(&self, legal: &[usize], board: &Board, player: Player) -> Option<usize> {
        legal.iter().copied().find(|&col| {
            board
                .with_move(col, player)
                .map(|next| detector::has_four(&next, player))
                .unwrap_or(false)
        })
    }

    /// Propagate the final reward backwards through the positions of this
    /// game. Every step uses the same `reward`, plus the discounted value of
    /// the position that followed it.
    pub fn backpropagate(&mut self, reward: f64) {
        let alpha = self.learning_rate;
        let mut next_value: Option<f64> = None;

        for fingerprint in self.trace.iter().rev() {
            let slot = self.values.entry(fingerprint.clone());
            let target = match next_value {
                Some(next) => reward + self.discount * next,
                None => reward,
            };
            *slot = (1.0 - alpha) * *slot + alpha * target;
            next_value = Some(*slot);
        }

        self.games_trained += 1;
    }

    /// Replace the value table with the stored policy. Any failure leaves the
    /// agent with an empty table.
    pub fn load_policy(&mut self, store: &dyn PolicyStore) -> bool {
        match store.load(&self.name) {
            Ok(snapshot) => {
                log::info!(
                    "loaded policy '{}' ({} positions, {} games)",
                    self.name,
                    snapshot.values.len(),
                    snapshot.games_trained
                );
                self.values = snapshot.values;
                self.games_trained = snapshot.games_trained;
                true
            }
            Err(PolicyError::NotFound { .. }) => {
                log::warn!("no policy for '{}', starting from scratch", self.name);
                self.cold_start();
                false
            }
            Err(e) => {
                log::warn!("could not load policy for '{}': {}", self.name, e);
                self.cold_start();
                false
            }
        }
    }

    pub fn save_policy(&self, store: &dyn PolicyStore) -> Result<(), PolicyError> {
        let snapshot = PolicySnapshot {
            games_trained: self.games_trained,
            values: self.values.clone(),
        };
        store.save(&self.name, &snapshot)?;
        log::info!(
            "saved policy '{}' ({} positions)",
            self.name,
            self.values.len()
        );
        Ok(())
    }

    fn cold_start(&mut self) {
        self.values = ValueTable::new();
        self.games_trained = 0;
    }
}

impl Participant for LearningAgent {
    fn choose_action(&mut self, legal: &[usize], board: &Board) -> Decision {
        Decision::Drop(self.select_column(legal, board))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn record_visited(&mut self, fingerprint: Fingerprint) {
        self.trace.push(fingerprint);
    }

    fn apply_reward(&mut self, reward: f64) {
        self.backpropagate(reward);
    }

    fn assign(&mut self, player: Player) {
        if player != self.player {
            log::debug!("{} now plays {}", self.name, player.name());
            self.player = player;
        }
    }

    fn reset_episode(&mut self) {
        self.trace.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::COLS;
    use crate::policy::FilePolicyStore;

    fn greedy_config() -> AgentConfig {
        AgentConfig {
            exploration_rate: 0.0,
            seed: Some(7),
            ..AgentConfig::default()
        }
    }

    fn board_from_moves(moves: &[(usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(col, player) in moves {
            board.apply_move(col, player).unwrap();
        }
        board
    }

    #[test]
    fn test_takes_immediate_win_before_values() {
        // X has three along the bottom in columns 1..=3; dropping in 4 wins.
        let board = board_from_moves(&[
            (1, Player::X),
            (2, Player::X),
            (3, Player::X),
            (6, Player::O),
            (6, Player::O),
        ]);
        let mut agent = LearningAgent::new("x", Player::X, &greedy_config());

        // Make the other options look far better
        for col in [2, 5] {
            let fp = board.with_move(col, Player::X).unwrap().fingerprint();
            agent.values_mut().set(fp, 100.0);
        }

        assert_eq!(agent.select_column(&[2, 4, 5], &board), 4);
    }

    #[test]
    fn test_blocks_opponent_win() {
        // O threatens to complete column 0
        let board = board_from_moves(&[
            (0, Player::O),
            (0, Player::O),
            (0, Player::O),
            (3, Player::X),
            (5, Player::X),
        ]);
        let mut agent = LearningAgent::new("x", Player::X, &greedy_config());
        let fp = board.with_move(6, Player::X).unwrap().fingerprint();
        agent.values_mut().set(fp, 50.0);

        assert_eq!(agent.select_column(&board.legal_columns(), &board), 0);
    }

    #[test]
    fn test_own_win_beats_block() {
        let board = board_from_moves(&[
            (0, Player::O),
            (0, Player::O),
            (0, Player::O),
            (6, Player::X),
            (6, Player::X),
            (6, Player::X),
        ]);
        let mut agent = LearningAgent::new("x", Player::X, &greedy_config());
        assert_eq!(agent.select_column(&board.legal_columns(), &board), 6);
    }

    #[test]
    fn test_greedy_picks_highest_value() {
        let board = Board::new();
        let mut agent = LearningAgent::new("o", Player::O, &greedy_config());
        let fp = board.with_move(2, Player::O).unwrap().fingerprint();
        agent.values_mut().set(fp, 0.5);

        assert_eq!(agent.select_column(&board.legal_columns(), &board), 2);
    }

    #[test]
    fn test_greedy_ties_go_to_last_column() {
        let board = Board::new();
        let mut agent = LearningAgent::new("x", Player::X, &greedy_config());
        assert_eq!(agent.select_column(&board.legal_columns(), &board), COLS - 1);

        let legal = [1, 3, 4];
        for col in legal {
            let fp = board.with_move(col, Player::X).unwrap().fingerprint();
            agent.values_mut().set(fp, 0.7);
        }
        assert_eq!(agent.select_column(&legal, &board), 4);
    }

    #[test]
    fn test_full_exploration_stays_legal() {
        let config = AgentConfig {
            exploration_rate: 1.0,
            seed: Some(3),
            ..AgentConfig::default()
        };
        let mut agent = LearningAgent::new("x", Player::X, &config);
        let board = Board::new();
        let legal = [0, 2, 6];

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let col = agent.select_column(&legal, &board);
            assert!(legal.contains(&col), "column {} is not legal", col);
            seen.insert(col);
        }
        assert_eq!(seen.len(), legal.len());
    }

    #[test]
    fn test_backpropagate_single_state() {
        let mut agent = LearningAgent::new("x", Player::X, &greedy_config());
        let fp = Board::new().with_move(0, Player::X).unwrap().fingerprint();
        agent.record_visited(fp.clone());

        agent.apply_reward(2.0);
        // (1 - 0.8) * 0 + 0.8 * 2
        assert!((agent.values().get(&fp) - 1.6).abs() < 1e-12);
        assert_eq!(agent.games_trained(), 1);
    }

    #[test]
    fn test_backpropagate_reuses_final_reward() {
        let mut agent = LearningAgent::new("x", Player::X, &greedy_config());
        let s1 = Board::new().with_move(0, Player::X).unwrap();
        let s2 = s1.with_move(1, Player::X).unwrap();
        let s3 = s2.with_move(2, Player::X).unwrap();
        for board in [s1, s2, s3] {
            agent.record_visited(board.fingerprint());
        }

        agent.apply_reward(-4.0);

        let v3 = 0.8 * -4.0;
        let v2 = 0.8 * (-4.0 + 0.9 * v3);
        let v1 = 0.8 * (-4.0 + 0.9 * v2);
        assert!((agent.values().get(&s3.fingerprint()) - v3).abs() < 1e-12);
        assert!((agent.values().get(&s2.fingerprint()) - v2).abs() < 1e-12);
        assert!((agent.values().get(&s1.fingerprint()) - v1).abs() < 1e-12);
    }

    #[test]
    fn test_backpropagate_blends_existing_values() {
        let mut agent = LearningAgent::new("x", Player::X, &greedy_config());
        let fp = Board::new().with_move(4, Player::X).unwrap().fingerprint();
        agent.values_mut().set(fp.clone(), 1.0);
        agent.record_visited(fp.clone());

        agent.apply_reward(-1.0);
        // 0.2 * 1.0 + 0.8 * -1.0
        assert!((agent.values().get(&fp) + 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_reset_episode_keeps_values() {
        let mut agent = LearningAgent::new("x", Player::X, &greedy_config());
        let fp = Board::new().with_move(3, Player::X).unwrap().fingerprint();
        agent.record_visited(fp.clone());
        agent.apply_reward(2.0);
        let learned = agent.values().get(&fp);

        agent.reset_episode();

        assert!(agent.trace().is_empty());
        assert_eq!(agent.values().get(&fp), learned);
        assert_ne!(learned, 0.0);
    }

    #[test]
    fn test_policy_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePolicyStore::new(dir.path());

        let mut agent = LearningAgent::new("U-0318", Player::X, &greedy_config());
        let fp = Board::new().with_move(3, Player::X).unwrap().fingerprint();
        agent.record_visited(fp.clone());
        agent.apply_reward(2.0);
        agent.save_policy(&store).unwrap();

        let mut restored = LearningAgent::new("U-0318", Player::X, &greedy_config());
        assert!(restored.load_policy(&store));
        assert_eq!(restored.values(), agent.values());
        assert_eq!(restored.games_trained(), 1);
    }

    #[test]
    fn test_missing_policy_cold_starts() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePolicyStore::new(dir.path());
        let mut agent = LearningAgent::new("ghost", Player::O, &greedy_config());
        agent
            .values_mut()
            .set(Board::new().fingerprint(), 3.0);

        assert!(!agent.load_policy(&store));
        assert!(agent.values().is_empty());
    }

    #[test]
    fn test_corrupt_policy_cold_starts() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePolicyStore::new(dir.path());
        std::fs::write(store.path_for("bad"), "{ truncated").unwrap();

        let mut agent = LearningAgent::new("bad", Player::X, &greedy_config());
        assert!(!agent.load_policy(&store));
        assert!(agent.values().is_empty());
        assert_eq!(agent.games_trained(), 0);
    }
}
