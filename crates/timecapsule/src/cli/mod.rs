//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the timecapsule binary.

mod bench;
mod characters;
mod check;
mod commands;
mod snapshot;
mod write;

pub use bench::run_bench_command;
pub use characters::list_characters;
pub use check::run_check;
pub use commands::{Cli, Commands};
pub use snapshot::run_snapshot;
pub use write::run_write;
