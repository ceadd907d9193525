//! Implements the command-line interface for the `hamcheck` conformance
//! runner.

use clap::Parser;
use hamcheck_harness::{CaseRegistry, RunnerConfig, TestOptions, TestRunner};
use std::time::Duration;

/// Main entry point for the `hamcheck` conformance runner.
fn main() {
    // Set up panic handler. On release builds, it will capture panic
    // details to a temporary file and report a human-readable message.
    human_panic::setup_panic!(human_panic::Metadata::new(
        env!("CARGO_BIN_NAME"),
        env!("CARGO_PKG_VERSION")
    ));

    let options = TestOptions::parse();

    let exit_code = match run(options) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            tracing::error!("error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

/// Runs the suite. Returns whether every executed round passed.
fn run(options: TestOptions) -> anyhow::Result<bool> {
    init_tracing();

    let registry = if options.discover {
        CaseRegistry::discover(&options.fixtures_dir)?
    } else {
        CaseRegistry::standard()
    };

    let config = RunnerConfig::new(&options.program, &options.fixtures_dir)
        .with_timeout(Duration::from_secs(options.timeout_in_seconds));

    let runner = TestRunner::new(config, options, registry);
    let summary = runner.run()?;

    Ok(summary.is_success())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("HAMCHECK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
