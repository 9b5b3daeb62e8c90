//! Command-line interface
//!
//! Thin layer over the library: resolves the log root, then prints the index, a resolved
//! session or an export. Logs go to stderr through `env_logger`, command output to stdout.

pub mod commands;
mod render;

pub use commands::{Cli, Commands, run};
