//! `rastgate`: read an image description on stdin and write a `P2` raster
//! to stdout, after a credential check on the controlling terminal.
//!
//! Diagnostics go to stderr and are controlled by `RUST_LOG`.

use std::io;
use std::process::ExitCode;

use rastgate::pipeline::{RunError, TtySource};
use rastgate::{run, RunConfig, RunSummary};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let config = RunConfig::default();
    let mut terminal = TtySource::from_config(&config.gate);
    let stdin = io::stdin();
    let stdout = io::stdout();

    exit_code(run(&config, &mut terminal, stdin.lock(), stdout.lock()))
}

/// Report a failed run on stderr and pick the process exit status.
fn exit_code(result: Result<RunSummary, RunError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(kind = e.kind(), "run failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
