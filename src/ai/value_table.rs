use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::game::Fingerprint;

/// Learned estimate of the long-term reward of each board position.
///
/// Positions never seen before are worth 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueTable {
    values: HashMap<Fingerprint, f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> f64 {
        self.values.get(fingerprint).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.values.contains_key(fingerprint)
    }

    /// Mutable slot for a position, inserted at 0 on first access.
    pub fn entry(&mut self, fingerprint: Fingerprint) -> &mut f64 {
        self.values.entry(fingerprint).or_insert(0.0)
    }

    pub fn set(&mut self, fingerprint: Fingerprint, value: f64) {
        self.values.insert(fingerprint, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, f64)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }
}
