//! Turn sequencing between two participants, terminal detection, and reward
//! dispatch at the end of each game.

mod rewards;
mod runner;

pub use rewards::RewardPolicy;
pub use runner::{Controller, GameEnd, Turn};
