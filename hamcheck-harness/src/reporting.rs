//! Reporting for conformance runs.

use crate::comparison::hex_dump;
use crate::config::{OutputFormat, TestOptions};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

/// Classified outcome of one round.
#[derive(Clone, Debug)]
pub enum Verdict {
    /// The program's stdout matched the expected block.
    Pass,
    /// stdout differed from the expected block.
    Mismatch {
        /// The expected text, as stored in the fixture.
        expected: String,
        /// The actual text captured from the program.
        actual: String,
    },
    /// The program wrote to stderr; stdout was not compared.
    ProgramError {
        /// The captured stderr text.
        stderr: String,
    },
    /// The program exceeded the bounded wait and was killed.
    Timeout {
        /// The configured timeout, in seconds.
        seconds: u64,
    },
}

impl Verdict {
    /// Returns whether this verdict counts as a pass.
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Result of one extraction + execution + comparison round.
#[derive(Clone, Debug)]
pub struct RoundResult {
    /// 1-based index of the round within its case.
    pub round: usize,
    /// Classified outcome.
    pub verdict: Verdict,
    /// Wall-clock duration of the external program run.
    pub duration: Duration,
}

/// Results for one case: every round run against its fixture, plus any
/// harness-level error that cut the case short.
#[derive(Clone, Debug)]
pub struct CaseResults {
    /// Identifier of the case.
    pub case_id: String,
    /// Per-round results, in fixture order.
    pub rounds: Vec<RoundResult>,
    /// Harness-level error for this case (missing or malformed
    /// fixture), if any.
    pub error: Option<String>,
}

impl CaseResults {
    /// Returns the number of passing rounds in this case.
    pub fn passed(&self) -> usize {
        self.rounds.iter().filter(|r| r.verdict.is_pass()).count()
    }

    /// Returns whether every round passed and no harness error occurred.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.passed() == self.rounds.len()
    }
}

/// Aggregate results of a full run.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    /// Per-case results, in registry order.
    pub cases: Vec<CaseResults>,
}

impl RunSummary {
    /// Total number of rounds attempted.
    pub fn total_rounds(&self) -> usize {
        self.cases.iter().map(|c| c.rounds.len()).sum()
    }

    /// Total number of passing rounds.
    pub fn passed_rounds(&self) -> usize {
        self.cases.iter().map(|c| c.passed()).sum()
    }

    /// Number of cases cut short by a harness-level error.
    pub fn case_errors(&self) -> usize {
        self.cases.iter().filter(|c| c.error.is_some()).count()
    }

    /// Returns whether the whole run succeeded.
    pub fn is_success(&self) -> bool {
        self.cases.iter().all(CaseResults::is_success)
    }
}

/// Reports run results based on the configured output format.
pub fn report_results(summary: &RunSummary, options: &TestOptions) -> Result<()> {
    match options.format {
        OutputFormat::Pretty => report_results_pretty(summary, options),
        OutputFormat::Junit => report_results_junit(summary, options),
        OutputFormat::Terse => report_summary_line(&mut std::io::stderr(), summary),
    }
}

fn report_results_pretty(summary: &RunSummary, options: &TestOptions) -> Result<()> {
    let mut writer = std::io::stderr();

    for case in &summary.cases {
        write_case_details(&mut writer, case, options)?;
    }

    writeln!(
        writer,
        "================================================================================"
    )?;
    report_summary_line(&mut writer, summary)?;
    writeln!(
        writer,
        "================================================================================"
    )?;

    Ok(())
}

fn report_summary_line<W: Write>(writer: &mut W, summary: &RunSummary) -> Result<()> {
    let passed = summary.passed_rounds();
    let total = summary.total_rounds();

    let formatted_passed = if passed == total {
        passed.to_string().green()
    } else {
        passed.to_string().red()
    };

    write!(writer, "Passed {formatted_passed}/{total} test rounds")?;

    let case_errors = summary.case_errors();
    if case_errors > 0 {
        write!(
            writer,
            " ({} case(s) had harness errors)",
            case_errors.to_string().red()
        )?;
    }

    writeln!(writer, ".")?;

    Ok(())
}

/// Writes the details of one case's results to a writer.
pub fn write_case_details<W: Write>(
    writer: &mut W,
    case: &CaseResults,
    options: &TestOptions,
) -> Result<()> {
    if !options.verbose && case.is_success() {
        writeln!(
            writer,
            "* {}: [{}]... {}",
            "Case".bright_yellow(),
            case.case_id.italic(),
            "ok.".bright_green()
        )?;
        return Ok(());
    }

    writeln!(
        writer,
        "* {}: [{}]...",
        "Case".bright_yellow(),
        case.case_id.italic()
    )?;

    for round in &case.rounds {
        write_round_details(writer, round, options)?;
    }

    if let Some(error) = &case.error {
        writeln!(writer, "    {}: {error}", "harness error".bright_red())?;
    }

    Ok(())
}

fn write_round_details<W: Write>(
    writer: &mut W,
    round: &RoundResult,
    options: &TestOptions,
) -> Result<()> {
    match &round.verdict {
        Verdict::Pass => {
            writeln!(writer, "    round {}: {}", round.round, "ok.".bright_green())?;
            if options.verbose {
                writeln!(writer, "      ran in {:?}", round.duration)?;
            }
        }
        Verdict::Mismatch { expected, actual } => {
            writeln!(
                writer,
                "    round {}: stdout {}",
                round.round,
                "DIFFERS:".bright_red()
            )?;

            writeln!(
                writer,
                "      {}",
                "------ Expected <> Actual: stdout -----------------------------".cyan()
            )?;
            write_diff(writer, 6, expected.trim(), actual.trim())?;
            writeln!(
                writer,
                "      {}",
                "---------------------------------------------------------------".cyan()
            )?;

            writeln!(writer, "      expected (hex): {}", hex_dump(expected))?;
            writeln!(writer, "      actual   (hex): {}", hex_dump(actual))?;
            writeln!(writer, "    {}", "FAILED.".bright_red())?;
        }
        Verdict::ProgramError { stderr } => {
            writeln!(
                writer,
                "    round {}: {}",
                round.round,
                "Error in programme".bright_red()
            )?;
            writeln!(writer, "{}", indent::indent_all_by(6, stderr.as_str()))?;
        }
        Verdict::Timeout { seconds } => {
            writeln!(
                writer,
                "    round {}: {} after {seconds}s",
                round.round,
                "TIMED OUT".bright_red()
            )?;
        }
    }

    Ok(())
}

/// Writes a line diff between two strings to a writer.
fn write_diff<W: Write>(writer: &mut W, indentation: usize, left: &str, right: &str) -> Result<()> {
    let indent_str = " ".repeat(indentation);

    for d in diff::lines(left, right) {
        let formatted = match d {
            diff::Result::Left(l) => std::format!("{indent_str}- {l}").red(),
            diff::Result::Both(l, _) => std::format!("{indent_str}  {l}").bright_black(),
            diff::Result::Right(r) => std::format!("{indent_str}+ {r}").green(),
        };

        writeln!(writer, "{formatted}")?;
    }

    Ok(())
}

fn report_results_junit(summary: &RunSummary, options: &TestOptions) -> Result<()> {
    let mut report = junit_report::Report::new();

    for case in &summary.cases {
        let mut suite = junit_report::TestSuite::new(case.case_id.as_str());

        for round in &case.rounds {
            let round_name = format!("{}::round{}", case.case_id, round.round);
            let mut test_case: junit_report::TestCase = if round.verdict.is_pass() {
                junit_report::TestCase::success(round_name.as_str(), round.duration.try_into()?)
            } else {
                junit_report::TestCase::failure(
                    round_name.as_str(),
                    round.duration.try_into()?,
                    "round failure",
                    "failed",
                )
            };

            let mut output_buf: Vec<u8> = vec![];
            write_round_details(&mut output_buf, round, options)?;

            let output_as_string = String::from_utf8(output_buf)?;
            test_case.set_system_out(strip_ansi_escapes::strip_str(output_as_string).as_str());

            suite.add_testcase(test_case);
        }

        if let Some(error) = &case.error {
            let error_case = junit_report::TestCase::failure(
                format!("{}::fixture", case.case_id).as_str(),
                junit_report::Duration::ZERO,
                "harness error",
                error.as_str(),
            );
            suite.add_testcase(error_case);
        }

        report.add_testsuite(suite);
    }

    report.write_xml(std::io::stdout())?;
    writeln!(std::io::stdout())?;

    Ok(())
}
