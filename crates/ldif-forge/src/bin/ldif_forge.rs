//! Command-line entry point for `ldif-forge`.
//!
//! This binary delegates to `ldif_forge::cli` for validation and the run
//! itself. Missing or malformed options are reported by clap with a usage
//! message and a non-zero exit status.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use ldif_forge::cli::{CliError, Options, run, seed_from_env, success_message};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let options = Options::parse();
    match execute(&options) {
        Ok(message) => {
            write_line(io::stdout().lock(), &message);
            ExitCode::SUCCESS
        }
        Err(err) => {
            write_line(io::stderr().lock(), &err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn execute(options: &Options) -> Result<String, CliError> {
    let seed = seed_from_env()?;
    let summary = run(options, seed)?;
    Ok(success_message(&summary, options.output()))
}

fn write_line(mut out: impl Write, line: &str) {
    if let Err(err) = writeln!(out, "{line}") {
        drop(err);
    }
}
