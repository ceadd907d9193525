//! Error types for the harness.

use std::path::PathBuf;

/// Errors surfaced by the harness itself, as opposed to failures of the
/// program under test.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// A record boundary in a fixture held no invocation tokens.
    #[error("malformed fixture {path}: expected an invocation line at line {line}")]
    MalformedFixture {
        /// Path of the offending fixture file.
        path: PathBuf,
        /// 1-based line number where the invocation was expected.
        line: usize,
    },

    /// A fixture file could not be opened or read.
    #[error("failed to read fixture {path}")]
    FixtureIo {
        /// Path of the fixture file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The external program could not be launched.
    #[error("failed to launch {program}")]
    Spawn {
        /// Path of the external program.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The external program did not terminate within the bounded wait
    /// and was killed.
    #[error("external program exceeded the {seconds}s timeout")]
    Timeout {
        /// The configured timeout, in seconds.
        seconds: u64,
    },
}
