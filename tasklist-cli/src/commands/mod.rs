//! Subcommand implementations

pub mod create_db;
pub mod serve;
pub mod tui;
