//! Command implementations and argument parsing for the fibforest CLI.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use crate::network::{CompanyNetwork, ScriptError};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "fibforest",
    about = "Maintain a branch network and report its minimum spanning forest."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Execute a network command script.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Script to execute. Reads standard input when omitted.
    pub path: Option<PathBuf>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the script file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading the script from standard input failed.
    #[error("failed to read script from stdin: {source}")]
    Stdin {
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The script itself failed.
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Number of branches left in the network.
    pub branches: usize,
    /// Number of connections left in the network.
    pub connections: usize,
    /// One line per `PRINT_MIN` command, in script order.
    pub outputs: Vec<String>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the script cannot be read or fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use fibforest_cli::cli::{Cli, Command, RunCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "3\nADD north 2\nADD south 2\nPRINT_MIN\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         path: Some(file.path().to_path_buf()),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.outputs, [""]);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run, io::stdin().lock())
        }
    }
}

/// Runs `command`, falling back to `stdin` when no path is given.
#[instrument(
    name = "cli.execute",
    err,
    skip(command, stdin),
    fields(source = field::Empty),
)]
pub(super) fn run_command(
    command: RunCommand,
    stdin: impl Read,
) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    let script = match command.path {
        Some(path) => {
            span.record("source", field::display(path.display()));
            read_script(&path)?
        }
        None => {
            span.record("source", field::display("<stdin>"));
            read_stdin(stdin)?
        }
    };

    let mut network = CompanyNetwork::new();
    let outputs = network.run_script(&script)?;
    let summary = ExecutionSummary {
        branches: network.branch_count(),
        connections: network.connection_count(),
        outputs,
    };
    info!(
        branches = summary.branches,
        connections = summary.connections,
        outputs = summary.outputs.len(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.read_script", err, fields(path = field::Empty))]
pub(super) fn read_script(path: &Path) -> Result<String, CliError> {
    Span::current().record("path", field::display(path.display()));
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_stdin(mut stdin: impl Read) -> Result<String, CliError> {
    let mut script = String::new();
    stdin
        .read_to_string(&mut script)
        .map_err(|source| CliError::Stdin { source })?;
    Ok(script)
}

/// Renders `summary` to `writer`, one `PRINT_MIN` result per line.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use fibforest_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     branches: 3,
///     connections: 2,
///     outputs: vec!["A:B B:C".into(), String::new()],
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(buffer.into_inner(), b"A:B B:C\n\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    for line in &summary.outputs {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
