//! Command line front end
//!
//! Subcommand handlers live in [`commands`]; the binary in `main.rs` only parses
//! arguments, merges them with the configuration file and dispatches.

pub mod commands;
pub mod error;

pub use error::CliError;
