//! Conformance run orchestration.

use crate::comparison::output_matches;
use crate::config::{RunnerConfig, TestOptions};
use crate::error::HarnessError;
use crate::execution::ProgramRunner;
use crate::fixture::{FixtureFile, FixtureRecord};
use crate::registry::CaseRegistry;
use crate::reporting::{CaseResults, RoundResult, RunSummary, Verdict, report_results};
use anyhow::Result;

/// The main conformance runner.
///
/// Cases run strictly in registry order; rounds within a case run
/// strictly in sequence, each starting only after the previous round's
/// process has terminated and its verdict is recorded.
pub struct TestRunner {
    config: RunnerConfig,
    options: TestOptions,
    registry: CaseRegistry,
}

impl TestRunner {
    /// Creates a runner over the given configuration, options, and case
    /// registry.
    pub const fn new(config: RunnerConfig, options: TestOptions, registry: CaseRegistry) -> Self {
        Self {
            config,
            options,
            registry,
        }
    }

    /// Runs all registered cases, reports results in the configured
    /// format, and returns the aggregate summary.
    pub fn run(&self) -> Result<RunSummary> {
        let case_ids: Vec<&String> = self
            .registry
            .cases()
            .iter()
            .filter(|id| self.options.should_run_case(id.as_str()))
            .collect();

        if self.options.list_cases_only {
            for case_id in case_ids {
                println!("{case_id}: case");
            }
            return Ok(RunSummary::default());
        }

        let runner = ProgramRunner::new(&self.config.program, self.config.timeout);

        let mut summary = RunSummary::default();
        for case_id in case_ids {
            summary.cases.push(self.run_case(case_id, &runner));
        }

        report_results(&summary, &self.options)?;

        Ok(summary)
    }

    /// Runs one case: opens its fixture once and performs rounds until
    /// the record stream is exhausted. The round count is data-driven;
    /// a fixture with a single record yields a single round.
    fn run_case(&self, case_id: &str, runner: &ProgramRunner) -> CaseResults {
        tracing::debug!(case_id, "running case");

        let mut results = CaseResults {
            case_id: case_id.to_owned(),
            rounds: vec![],
            error: None,
        };

        let fixture_path = self.config.fixture_path(case_id);
        let mut fixture = match FixtureFile::open(&fixture_path) {
            Ok(fixture) => fixture,
            Err(error) => {
                results.error = Some(error.to_string());
                return results;
            }
        };

        loop {
            let record = match fixture.next_record() {
                Ok(Some(record)) => record,
                Ok(None) => break,
                Err(error) => {
                    results.error = Some(error.to_string());
                    break;
                }
            };

            let round = results.rounds.len() + 1;
            match self.run_round(round, &record, runner) {
                Ok(round_result) => results.rounds.push(round_result),
                Err(error) => {
                    results.error = Some(error.to_string());
                    break;
                }
            }
        }

        results
    }

    /// Runs one round: executes the program and classifies the outcome.
    /// Stderr content takes precedence over any stdout comparison.
    fn run_round(
        &self,
        round: usize,
        record: &FixtureRecord,
        runner: &ProgramRunner,
    ) -> Result<RoundResult, HarnessError> {
        match runner.run(&record.args) {
            Ok(result) => {
                let verdict = if !result.stderr.is_empty() {
                    Verdict::ProgramError {
                        stderr: result.stderr,
                    }
                } else if output_matches(&record.expected, &result.stdout) {
                    Verdict::Pass
                } else {
                    Verdict::Mismatch {
                        expected: record.expected.clone(),
                        actual: result.stdout,
                    }
                };

                Ok(RoundResult {
                    round,
                    verdict,
                    duration: result.duration,
                })
            }
            Err(HarnessError::Timeout { seconds }) => Ok(RoundResult {
                round,
                verdict: Verdict::Timeout { seconds },
                duration: self.config.timeout,
            }),
            Err(error) => Err(error),
        }
    }
}
