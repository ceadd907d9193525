//! Harness library for running fixture-driven conformance suites against
//! an external solver executable.
//!
//! A *fixture* is a plain-text `<case>.out` file encoding one or more
//! records, each consisting of an invocation line followed by an
//! expected-output block terminated by a blank line (or end of file).
//! The harness opens each fixture once, consumes its records through a
//! shared read cursor, runs the configured external program per record,
//! and compares the program's stdout against the expected block after
//! trimming leading and trailing whitespace on both sides.
//!
//! A round is classified as one of:
//!
//! 1. **Pass**: stderr was empty and stdout matched the expected block.
//! 2. **Mismatch**: stderr was empty but stdout differed.
//! 3. **Program error**: the program wrote to stderr; stdout is not
//!    compared.
//! 4. **Timeout**: the program exceeded the bounded wait and was killed.

mod comparison;
mod config;
mod error;
mod execution;
mod fixture;
mod registry;
mod reporting;
mod runner;

pub use comparison::{hex_dump, output_matches};
pub use config::{OutputFormat, RunnerConfig, TestOptions};
pub use error::HarnessError;
pub use execution::{DEFAULT_TIMEOUT_IN_SECONDS, ProgramRunner, RunResult};
pub use fixture::{FixtureFile, FixtureRecord};
pub use registry::CaseRegistry;
pub use reporting::{CaseResults, RoundResult, RunSummary, Verdict};
pub use runner::TestRunner;
