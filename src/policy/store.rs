use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::PolicyError;
use crate::policy::metadata::{PolicyFile, PolicyMetadata, PolicySnapshot};

/// Durable key-value storage for learned policies, keyed by agent name.
pub trait PolicyStore {
    /// Replace whatever is stored under `name`.
    fn save(&self, name: &str, snapshot: &PolicySnapshot) -> Result<(), PolicyError>;

    /// Fetch the policy stored under `name`, or `PolicyError::NotFound`.
    fn load(&self, name: &str) -> Result<PolicySnapshot, PolicyError>;
}

/// Where policies live and which names the two training seats use.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub dir: PathBuf,
    pub first_agent: String,
    pub second_agent: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            dir: PathBuf::from("Files"),
            first_agent: "U-0318".to_string(),
            second_agent: "U-0314".to_string(),
        }
    }
}

/// Stores each policy as `policy_<name>.json` inside one directory.
pub struct FilePolicyStore {
    dir: PathBuf,
}

impl FilePolicyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        FilePolicyStore { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("policy_{name}.json"))
    }

    /// Read only the header of a stored policy.
    pub fn metadata(&self, name: &str) -> Result<PolicyMetadata, PolicyError> {
        self.read_file(name).map(|file| file.metadata)
    }

    fn read_file(&self, name: &str) -> Result<PolicyFile, PolicyError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(PolicyError::NotFound {
                name: name.to_string(),
            });
        }

        let json = fs::read_to_string(&path).map_err(|e| PolicyError::Read {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| PolicyError::Parse { path, source: e })
    }
}

impl PolicyStore for FilePolicyStore {
    fn save(&self, name: &str, snapshot: &PolicySnapshot) -> Result<(), PolicyError> {
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let file = PolicyFile {
            metadata: PolicyMetadata {
                name: name.to_string(),
                games_trained: snapshot.games_trained,
                saved_at,
                entries: snapshot.values.len(),
            },
            values: snapshot.values.clone(),
        };
        let json = serde_json::to_string(&file)?;

        // Atomic replace: temp file, then rename
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| PolicyError::Write {
            path: tmp_path.clone(),
            source: e,
        })?;
        fs::rename(&tmp_path, &path)?;

        log::debug!(
            "saved policy '{}' ({} entries) to {}",
            name,
            file.metadata.entries,
            path.display()
        );
        Ok(())
    }

    fn load(&self, name: &str) -> Result<PolicySnapshot, PolicyError> {
        let file = self.read_file(name)?;
        Ok(PolicySnapshot {
            games_trained: file.metadata.games_trained,
            values: file.values,
        })
    }
}
