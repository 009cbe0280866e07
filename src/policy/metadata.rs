use serde::{Deserialize, Serialize};

use crate::ai::ValueTable;

/// Descriptive header written next to the value table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyMetadata {
    pub name: String,
    pub games_trained: u64,
    pub saved_at: u64,
    pub entries: usize,
}

/// Everything an agent needs to pick up where it left off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicySnapshot {
    pub games_trained: u64,
    pub values: ValueTable,
}

/// On-disk layout of a policy file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PolicyFile {
    pub metadata: PolicyMetadata,
    pub values: ValueTable,
}
