//! Execution of the external program under test.

use crate::error::HarnessError;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

/// Default timeout for external program runs, in seconds.
pub const DEFAULT_TIMEOUT_IN_SECONDS: u64 = 15;

/// Captured results of one external program run.
#[derive(Debug)]
pub struct RunResult {
    /// Exit status of the program.
    pub exit_status: ExitStatus,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

/// Runs the external program with arguments taken from fixture records.
///
/// The program path is explicit configuration rather than fixture
/// content; fixtures only carry a placeholder in its position.
#[derive(Clone, Debug)]
pub struct ProgramRunner {
    program: PathBuf,
    timeout: Duration,
}

impl ProgramRunner {
    /// Creates a runner for the program at the given path.
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Returns the path of the external program.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Spawns the program with the given arguments and empty stdin,
    /// waiting for termination and collecting all of stdout and stderr.
    ///
    /// The wait is bounded: on expiry the child is killed and
    /// [`HarnessError::Timeout`] is returned.
    pub fn run(&self, args: &[String]) -> Result<RunResult, HarnessError> {
        let mut cmd = assert_cmd::Command::new(&self.program);
        cmd.args(args);
        cmd.timeout(self.timeout);

        // Empty stdin so a program that reads input sees EOF at once.
        cmd.write_stdin("");

        tracing::debug!(program = %self.program.display(), ?args, "spawning external program");

        let start_time = std::time::Instant::now();
        let output = cmd.output();
        let duration = start_time.elapsed();

        match output {
            Ok(output) => Ok(RunResult {
                exit_status: output.status,
                stdout: String::from_utf8_lossy(output.stdout.as_slice()).to_string(),
                stderr: String::from_utf8_lossy(output.stderr.as_slice()).to_string(),
                duration,
            }),
            Err(source) => {
                if source.kind() == std::io::ErrorKind::TimedOut || duration >= self.timeout {
                    Err(HarnessError::Timeout {
                        seconds: self.timeout.as_secs(),
                    })
                } else {
                    Err(HarnessError::Spawn {
                        program: self.program.clone(),
                        source,
                    })
                }
            }
        }
    }
}
