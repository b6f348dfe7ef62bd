//! # Connect Four
//!
//! A two-player Connect Four rules engine with optional variant wins (a 2x2
//! square and the four board corners), cumulative scoring across rounds, and
//! a terminal front end built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, players, rule set, win detection, round controller
//! - [`ui`]: Terminal UI that feeds column selections into the controller
//! - [`replay`]: Headless play from a list of columns
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod replay;
pub mod ui;
