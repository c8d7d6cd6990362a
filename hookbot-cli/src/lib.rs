//! # hookbot-cli
//!
//! Argument parsing, config loading and the demo bot served by the `hookbot` binary.

pub mod cli;
pub mod demo;

pub use cli::{load_config, Cli, Commands};
pub use demo::{build_demo_bot, demo_commands};
