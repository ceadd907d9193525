//! Configuration types for the conformance runner.

use crate::execution::DEFAULT_TIMEOUT_IN_SECONDS;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the runner: which program to exercise, where the
/// fixtures live, and how long to wait per round.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Path to the external program under test.
    pub program: PathBuf,
    /// Directory containing `<case>.out` fixture files.
    pub fixtures_dir: PathBuf,
    /// Bounded wait for each external program run.
    pub timeout: Duration,
}

impl RunnerConfig {
    /// Creates a runner config with the default timeout.
    pub fn new(program: impl Into<PathBuf>, fixtures_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            fixtures_dir: fixtures_dir.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_IN_SECONDS),
        }
    }

    /// Sets the per-round timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the fixture path for a case identifier.
    pub fn fixture_path(&self, case_id: &str) -> PathBuf {
        self.fixtures_dir.join(format!("{case_id}.out"))
    }
}

/// Output format for run results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// `JUnit` XML format.
    Junit,
    /// Summary line only.
    Terse,
}

/// Command-line options for the conformance runner.
#[derive(Clone, Debug, Parser)]
#[clap(version, about)]
pub struct TestOptions {
    /// Path to the external program under test.
    #[clap(long = "program", env = "HAMCHECK_PROGRAM")]
    pub program: PathBuf,

    /// Directory containing <case>.out fixture files.
    #[clap(long = "fixtures", default_value = ".", env = "HAMCHECK_FIXTURES")]
    pub fixtures_dir: PathBuf,

    /// Discover cases by globbing *.out under the fixtures directory
    /// instead of using the built-in case list.
    #[clap(long = "discover")]
    pub discover: bool,

    /// Per-round timeout in seconds.
    #[clap(long = "timeout-seconds", default_value_t = DEFAULT_TIMEOUT_IN_SECONDS)]
    pub timeout_in_seconds: u64,

    /// Output format for run results.
    #[clap(long = "format", default_value = "pretty")]
    pub format: OutputFormat,

    /// List cases without running them.
    #[clap(long = "list")]
    pub list_cases_only: bool,

    /// Display details regarding passing rounds too.
    #[clap(short = 'v', long = "verbose", env = "HAMCHECK_VERBOSE")]
    pub verbose: bool,

    /// Exactly match filters (not just substring match).
    #[clap(long = "exact")]
    pub exact_match: bool,

    /// Patterns for cases to be excluded.
    #[clap(long = "skip")]
    pub exclude_filters: Vec<String>,

    /// Patterns for cases to be included.
    pub include_filters: Vec<String>,
}

impl TestOptions {
    /// Returns whether a case should run based on include/exclude
    /// filters.
    pub fn should_run_case(&self, case_id: &str) -> bool {
        if self.include_filters.is_empty() && self.exclude_filters.is_empty() {
            return true;
        }

        // If any include filters were given, then we are in opt-in mode.
        if !self.include_filters.is_empty()
            && !self.case_matches_filters(case_id, &self.include_filters)
        {
            return false;
        }

        // In all cases, exclude filters may be used to exclude cases.
        if !self.exclude_filters.is_empty()
            && self.case_matches_filters(case_id, &self.exclude_filters)
        {
            return false;
        }

        true
    }

    fn case_matches_filters(&self, case_id: &str, filters: &[String]) -> bool {
        if self.exact_match {
            filters.iter().any(|f| f == case_id)
        } else {
            filters.iter().any(|filter| case_id.contains(filter))
        }
    }
}
