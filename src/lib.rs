//! # Four In A Line
//!
//! Connect Four on a 6x7 board with a tabular reinforcement-learning agent.
//! Two agents improve by playing each other; a human can then play against
//! either of them on the console or in a Ratatui terminal UI.
//!
//! ## Modules
//!
//! - [`game`] — Board, players, win detection, game state machine
//! - [`ai`] — Participant trait, learning agent, random agent, value table
//! - [`controller`] — Turn loop and end-of-game rewards
//! - [`training`] — Self-play trainer, metrics collection, evaluation
//! - [`policy`] — Persistence of learned value tables
//! - [`ui`] — Console and terminal UI human players
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod policy;
pub mod training;
pub mod ui;
