//! CLI library components for the blocklist matcher.

pub mod cli;
pub mod commands;
pub mod exit_codes;
pub mod logging;
pub mod summary;
pub mod types;
