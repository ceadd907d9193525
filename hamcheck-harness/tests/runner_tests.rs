//! End-to-end tests driving the runner against stub external programs.

#![cfg(unix)]

use assert_fs::fixture::{FileWriteStr, PathChild};
use clap::Parser;
use hamcheck_harness::{CaseRegistry, RunnerConfig, TestOptions, TestRunner, Verdict};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn write_stub(dir: &assert_fs::TempDir, name: &str, script: &str) -> PathBuf {
    let stub = dir.child(name);
    stub.write_str(script).unwrap();

    // chmod u+x
    let mut perms = stub.metadata().unwrap().permissions();
    perms.set_mode(perms.mode() | 0o700);
    std::fs::set_permissions(&stub, perms).unwrap();

    stub.path().to_path_buf()
}

fn options_for(program: &Path, fixtures_dir: &assert_fs::TempDir) -> TestOptions {
    TestOptions::parse_from([
        "hamcheck",
        "--program",
        program.to_str().unwrap(),
        "--fixtures",
        fixtures_dir.path().to_str().unwrap(),
        "--format",
        "terse",
    ])
}

fn run_suite(program: &Path, fixtures_dir: &assert_fs::TempDir) -> hamcheck_harness::RunSummary {
    let registry = CaseRegistry::discover(fixtures_dir.path()).unwrap();
    let config = RunnerConfig::new(program, fixtures_dir.path());
    let runner = TestRunner::new(config, options_for(program, fixtures_dir), registry);
    runner.run().unwrap()
}

#[test]
fn two_record_fixture_passes_both_rounds() {
    let dir = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(
        &dir,
        "solver.sh",
        "#!/bin/sh\nif [ \"$1\" = \"1\" ]; then echo HELLO; else echo WORLD; fi\n",
    );
    dir.child("scenario-a.out")
        .write_str("foo 1 2\nHELLO\n\nfoo 3\nWORLD\n")
        .unwrap();

    let summary = run_suite(&stub, &dir);

    assert_eq!(summary.total_rounds(), 2);
    assert_eq!(summary.passed_rounds(), 2);
    assert!(summary.is_success());
}

#[test]
fn stderr_output_classifies_round_as_error_but_run_continues() {
    let dir = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(
        &dir,
        "solver.sh",
        concat!(
            "#!/bin/sh\n",
            "if [ \"$1\" = \"1\" ]; then\n",
            "  echo HELLO\n",
            "  echo 'warning: deprecated' >&2\n",
            "else\n",
            "  echo WORLD\n",
            "fi\n",
        ),
    );
    dir.child("scenario-b.out")
        .write_str("foo 1\nHELLO\n\nfoo 2\nWORLD\n")
        .unwrap();

    let summary = run_suite(&stub, &dir);

    let case = &summary.cases[0];
    assert_eq!(case.rounds.len(), 2);
    assert!(matches!(
        case.rounds[0].verdict,
        Verdict::ProgramError { .. }
    ));
    assert!(case.rounds[1].verdict.is_pass());
    assert_eq!(summary.passed_rounds(), 1);
    assert!(!summary.is_success());
}

#[test]
fn interior_whitespace_difference_is_a_mismatch() {
    let dir = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(&dir, "solver.sh", "#!/bin/sh\nprintf 'A\\n B\\n'\n");
    dir.child("scenario-c.out").write_str("foo x\nA\nB\n").unwrap();

    let summary = run_suite(&stub, &dir);

    let case = &summary.cases[0];
    match &case.rounds[0].verdict {
        Verdict::Mismatch { expected, actual } => {
            assert_eq!(expected, "A\nB\n");
            assert_eq!(actual, "A\n B\n");
        }
        other => panic!("expected mismatch, got {other:?}"),
    }
    assert_eq!(summary.passed_rounds(), 0);
}

#[test]
fn single_record_fixture_runs_exactly_one_round() {
    let dir = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(&dir, "solver.sh", "#!/bin/sh\necho ONLY\n");
    dir.child("scenario-d.out").write_str("foo z\nONLY\n").unwrap();

    let summary = run_suite(&stub, &dir);

    assert_eq!(summary.total_rounds(), 1);
    assert_eq!(summary.passed_rounds(), 1);
    assert!(summary.is_success());
}

#[test]
fn trailing_newline_count_does_not_matter() {
    let dir = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(&dir, "solver.sh", "#!/bin/sh\nprintf 'HELLO\\n\\n\\n'\n");
    dir.child("trailing.out").write_str("foo a\nHELLO\n").unwrap();

    let summary = run_suite(&stub, &dir);
    assert!(summary.is_success());
}

#[test]
fn slow_program_times_out_and_is_killed() {
    let dir = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(&dir, "solver.sh", "#!/bin/sh\nsleep 30\necho LATE\n");
    dir.child("slow.out").write_str("foo a\nLATE\n").unwrap();

    let registry = CaseRegistry::discover(dir.path()).unwrap();
    let config = RunnerConfig::new(&stub, dir.path()).with_timeout(Duration::from_secs(1));
    let runner = TestRunner::new(config, options_for(&stub, &dir), registry);

    let summary = runner.run().unwrap();

    assert!(matches!(
        summary.cases[0].rounds[0].verdict,
        Verdict::Timeout { seconds: 1 }
    ));
    assert!(!summary.is_success());
}

#[test]
fn missing_fixture_is_reported_as_case_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(&dir, "solver.sh", "#!/bin/sh\necho X\n");

    let registry = CaseRegistry::standard();
    let config = RunnerConfig::new(&stub, dir.path());
    let mut options = options_for(&stub, &dir);
    options.include_filters = vec![String::from("2-node1")];
    options.exact_match = true;
    let runner = TestRunner::new(config, options, registry);

    let summary = runner.run().unwrap();

    assert_eq!(summary.cases.len(), 1);
    assert!(summary.cases[0].error.is_some());
    assert!(!summary.is_success());
}

#[test]
fn malformed_fixture_surfaces_an_error_after_valid_records() {
    let dir = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(&dir, "solver.sh", "#!/bin/sh\necho OK\n");
    // Second record boundary holds a blank line instead of an
    // invocation.
    dir.child("malformed.out")
        .write_str("foo a\nOK\n\n\nfoo b\nOK\n")
        .unwrap();

    let summary = run_suite(&stub, &dir);

    let case = &summary.cases[0];
    assert_eq!(case.rounds.len(), 1);
    assert!(case.rounds[0].verdict.is_pass());
    let error = case.error.as_deref().unwrap();
    assert!(error.contains("malformed fixture"));
    assert!(!summary.is_success());
}

#[test]
fn rerunning_the_same_suite_is_idempotent() {
    let dir = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(
        &dir,
        "solver.sh",
        "#!/bin/sh\nif [ \"$1\" = \"1\" ]; then echo HELLO; else echo NOPE; fi\n",
    );
    dir.child("repeat.out")
        .write_str("foo 1\nHELLO\n\nfoo 2\nWORLD\n")
        .unwrap();

    let first = run_suite(&stub, &dir);
    let second = run_suite(&stub, &dir);

    assert_eq!(first.total_rounds(), second.total_rounds());
    assert_eq!(first.passed_rounds(), second.passed_rounds());
    assert_eq!(first.passed_rounds(), 1);
}

#[test]
fn filters_restrict_which_cases_run() {
    let dir = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(&dir, "solver.sh", "#!/bin/sh\necho OK\n");
    dir.child("alpha.out").write_str("foo a\nOK\n").unwrap();
    dir.child("beta.out").write_str("foo b\nOK\n").unwrap();

    let registry = CaseRegistry::discover(dir.path()).unwrap();
    let config = RunnerConfig::new(&stub, dir.path());
    let mut options = options_for(&stub, &dir);
    options.include_filters = vec![String::from("alpha")];
    let runner = TestRunner::new(config, options, registry);

    let summary = runner.run().unwrap();

    assert_eq!(summary.cases.len(), 1);
    assert_eq!(summary.cases[0].case_id, "alpha");
}
