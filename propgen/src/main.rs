mod commands;
mod interrupt;
mod language;
mod lifecycle;
mod ops;
mod reports;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{commands::Cli, lifecycle::Interrupted};

fn main() -> ExitCode {
    if let Err(e) = color_eyre::install() {
        eprintln!("failed to install error reporter: {e}");
        return ExitCode::FAILURE;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit 1; --help and --version exit 0.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => exit_with(report),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// `128 + signal` for an interrupted run, 1 for any other failure.
fn exit_code(report: &eyre::Report) -> u8 {
    report
        .downcast_ref::<Interrupted>()
        .map_or(1, Interrupted::exit_code)
}

/// Print `report` and map it to the process exit status.
fn exit_with(report: eyre::Report) -> ExitCode {
    let code = exit_code(&report);

    match report.downcast::<propgen_schema::Error>() {
        Ok(schema_error) => eprintln!("{:?}", miette::Report::new(schema_error)),
        Err(report) => eprintln!("Error: {:?}", report),
    }
    ExitCode::from(code)
}
