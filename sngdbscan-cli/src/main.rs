//! Entry point for the `sngdbscan` binary.
//!
//! Logging is initialised first so every later failure is reported through
//! `tracing`; labels go to stdout and the process exits non-zero on error.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sngdbscan_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use sngdbscan_providers_dense::DenseMatrixProviderError;
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, point_set_code) = match err.downcast_ref::<CliError>() {
            Some(CliError::Core(core)) => (Some(core.code().as_str()), core.point_set_code()),
            Some(CliError::Dense(DenseMatrixProviderError::PointSet(points))) => {
                (None, Some(points.code()))
            }
            _ => (None, None),
        };

        error!(
            error = %format!("{err:#}"),
            code = code.map(field::display),
            point_set_code = point_set_code.map(|code| field::display(code.as_str())),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

// Tracing is not available yet, so this is the one direct write to stderr.
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
