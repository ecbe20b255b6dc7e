//! Subcommand handlers

pub mod check;
pub mod config;
pub mod play;
pub mod spans;
