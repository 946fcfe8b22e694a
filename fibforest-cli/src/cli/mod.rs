//! Command-line interface orchestration for fibforest.
//!
//! The CLI offers a single `run` command that executes a network command
//! script from a file or standard input and prints one line per `PRINT_MIN`.

mod commands;

pub use commands::{Cli, CliError, Command, ExecutionSummary, RunCommand, render_summary, run_cli};

#[cfg(test)]
mod test_helpers;
