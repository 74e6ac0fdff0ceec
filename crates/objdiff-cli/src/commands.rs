use std::io::{self, IsTerminal};
use std::process::ExitCode;

use objdiff_core::{diff_values, DiffOptions, DiffStatus};
use tracing::debug;

use crate::cli::Cli;
use crate::load::load_document;

/// Exit code for unreadable input or a rendering failure.
const EXIT_FAILURE: u8 = 2;

pub fn run_command(cli: Cli) -> ExitCode {
    match cmd_diff(&cli) {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(err) => {
            debug!(error = ?err, "diff failed");
            eprintln!("{err}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn cmd_diff(cli: &Cli) -> anyhow::Result<DiffStatus> {
    let old = load_document(&cli.file1)?;
    let new = load_document(&cli.file2)?;

    let stdout = io::stdout();
    let options = DiffOptions {
        color: cli.use_color() && stdout.is_terminal(),
    };
    debug!(
        file1 = %cli.file1.display(),
        file2 = %cli.file2.display(),
        ?options,
        "diffing documents"
    );

    let mut out = stdout.lock();
    let status = diff_values(&old, &new, &options, &mut out)?;
    Ok(status)
}
