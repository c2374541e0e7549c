//! # monitor-cli
//!
//! Operator CLI for the message monitor: argument parsing, env config, tracing
//! setup and subcommand handlers over a SQLite message store.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logger;

pub use cli::{Cli, Commands};
pub use commands::execute;
pub use config::MonitorConfig;
pub use logger::init_tracing;
