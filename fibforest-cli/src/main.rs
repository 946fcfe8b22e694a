//! CLI entry point for the fibforest branch network.
//!
//! Parses command-line arguments with clap, executes the network script,
//! prints one line per `PRINT_MIN` to stdout, and maps errors to exit codes.
//! Logging is initialised first so later failures carry structured fields.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use fibforest_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render output")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let script = err
            .downcast_ref::<CliError>()
            .and_then(|cli_error| match cli_error {
                CliError::Script(script) => Some(script),
                _ => None,
            });

        let line_field = script.map(|script| script.line);
        let code_field = script.map(|script| field::display(script.code().as_str()));
        let graph_code_field = script
            .and_then(|script| script.error.graph_code())
            .map(|code| field::display(code.as_str()));
        let msf_code_field = script
            .and_then(|script| script.error.msf_code())
            .map(|code| field::display(code.as_str()));

        error!(
            error = %err,
            line = line_field,
            code = code_field,
            graph_code = graph_code_field,
            msf_code = msf_code_field,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialised"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
