//! Training infrastructure: self-play trainer, metrics collection, and
//! greedy evaluation against a random opponent.

pub mod evaluation;
pub mod metrics;
pub mod trainer;
