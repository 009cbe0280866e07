use std::path::Path;

use crate::ai::AgentConfig;
use crate::error::ConfigError;
use crate::policy::PolicyConfig;
use crate::training::trainer::TrainerConfig;

/// Settings for games against a human.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Exploration rate of the agent while a human is at the board.
    pub exploration_rate: f64,
    pub human_name: String,
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            exploration_rate: 0.0,
            human_name: "Player".to_string(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub training: TrainerConfig,
    pub policy: PolicyConfig,
    pub play: PlayConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.agent.exploration_rate) {
            return Err(ConfigError::Validation(
                "agent.exploration_rate must be in [0, 1]".into(),
            ));
        }
        if self.agent.learning_rate <= 0.0 || self.agent.learning_rate > 1.0 {
            return Err(ConfigError::Validation(
                "agent.learning_rate must be in (0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.agent.discount) {
            return Err(ConfigError::Validation(
                "agent.discount must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.play.exploration_rate) {
            return Err(ConfigError::Validation(
                "play.exploration_rate must be in [0, 1]".into(),
            ));
        }

        if self.training.num_games == 0 {
            return Err(ConfigError::Validation(
                "training.num_games must be > 0".into(),
            ));
        }
        if self.training.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }

        if self.policy.first_agent.trim().is_empty() || self.policy.second_agent.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "policy agent names must not be empty".into(),
            ));
        }
        if self.policy.first_agent == self.policy.second_agent {
            return Err(ConfigError::Validation(
                "policy.first_agent and policy.second_agent must differ".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!((config.agent.exploration_rate - 0.4).abs() < 1e-12);
        assert!((config.agent.learning_rate - 0.8).abs() < 1e-12);
        assert!((config.agent.discount - 0.9).abs() < 1e-12);
        assert_eq!(config.training.num_games, 1000);
        assert_eq!(config.policy.first_agent, "U-0318");
        assert_eq!(config.policy.second_agent, "U-0314");
        assert_eq!(config.play.exploration_rate, 0.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[agent]
learning_rate = 0.5
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!((config.agent.learning_rate - 0.5).abs() < 1e-9);
        // Other fields should be defaults
        assert!((config.agent.discount - 0.9).abs() < 1e-9);
        assert_eq!(config.training.num_games, 1000);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.training.num_games, default.training.num_games);
        assert_eq!(config.policy.dir, default.policy.dir);
        assert!(config.agent.seed.is_none());
    }

    #[test]
    fn test_validation_rejects_zero_games() {
        let mut config = AppConfig::default();
        config.training.num_games = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_log_interval() {
        let mut config = AppConfig::default();
        config.training.log_interval = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_exploration_out_of_range() {
        let mut config = AppConfig::default();
        config.agent.exploration_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.play.exploration_rate = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_learning_rate() {
        let mut config = AppConfig::default();
        config.agent.learning_rate = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_invalid_discount() {
        let mut config = AppConfig::default();
        config.agent.discount = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_agent_names() {
        let mut config = AppConfig::default();
        config.policy.first_agent = "  ".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.policy.second_agent = config.policy.first_agent.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.training.num_games, 1000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[training]
num_games = 500

[policy]
dir = "policies"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.training.num_games, 500);
        assert_eq!(config.policy.dir, std::path::PathBuf::from("policies"));
        // Others are defaults
        assert!((config.agent.learning_rate - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[agent]\ndiscount = 2.0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[agent\nlearning_rate = ").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
