//! Human participants: a line-oriented console player and a full-screen
//! terminal UI player.

mod app;
mod game_view;
mod text;

pub use app::{EndAction, TuiPlayer};
pub use text::{read_name, TextPlayer};
