//! Participants: the shared seat interface, the tabular learning agent and
//! its value table, and a uniform-random opponent.

mod learning;
mod participant;
mod random;
mod value_table;

pub use learning::{AgentConfig, LearningAgent};
pub use participant::{Decision, Participant, ParticipantKind};
pub use random::RandomAgent;
pub use value_table::ValueTable;
