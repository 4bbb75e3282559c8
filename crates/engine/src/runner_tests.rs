#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::compare::{CaseOutcome, StreamVerdict};
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

#[fixture]
fn tests_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write(dir: &TempDir, name: &str, content: &[u8]) {
    fs::write(dir.path().join(name), content).unwrap();
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

async fn run_all(plan: &Plan, slots: usize) -> (RunSummary, Vec<CaseResult>) {
    let mut cases = Vec::new();
    let summary = plan
        .execute(&Executor::new(slots), |case| cases.push(case.clone()))
        .await;
    (summary, cases)
}

#[rstest]
fn prepare_rejects_missing_tests_dir(tests_dir: TempDir) {
    let config = RunConfig::new(tests_dir.path().join("nope"), argv(&["/bin/cat"]));
    let err = Runner::new(config).prepare().unwrap_err();
    assert!(matches!(err, RunError::TestsDirMissing(_)));
    assert!(err.to_string().contains("does not exist"));
}

#[rstest]
fn prepare_rejects_missing_command(tests_dir: TempDir) {
    let config = RunConfig::new(tests_dir.path(), argv(&["/no/such/program"]));
    let err = Runner::new(config).prepare().unwrap_err();
    assert!(matches!(err, RunError::Command(ExecError::NotFound(_))));
}

#[rstest]
fn prepare_rejects_two_placeholders(tests_dir: TempDir) {
    write(&tests_dir, "a.in", b"");
    let config = RunConfig::new(tests_dir.path(), argv(&["/bin/echo", "@", "@"]));
    let err = Runner::new(config).prepare().unwrap_err();
    assert!(matches!(
        err,
        RunError::Template(TemplateError::MultiplePlaceholders)
    ));
}

#[rstest]
fn prepare_rejects_bad_manifest(tests_dir: TempDir) {
    write(&tests_dir, "a.in", b"");
    write(&tests_dir, "tests.json", b"[\"not\", \"an object\"]");
    let config = RunConfig::new(tests_dir.path(), argv(&["/bin/cat"]));
    let err = Runner::new(config).prepare().unwrap_err();
    assert!(matches!(err, RunError::Manifest { .. }));
    assert!(err.to_string().contains("tests.json"));
}

#[rstest]
fn prepare_binds_manifest_arguments(tests_dir: TempDir) {
    write(&tests_dir, "args-test.in", b"");
    write(&tests_dir, "other.in", b"");
    write(
        &tests_dir,
        "tests.json",
        br#"{"args test": {"--name": "world"}, "ghost": {}}"#,
    );
    let config = RunConfig::new(tests_dir.path(), argv(&["/bin/echo", "@"]));

    let plan = Runner::new(config).prepare().unwrap();

    assert_eq!(plan.len(), 2);
    assert_eq!(
        plan.fixtures()[0].command,
        vec!["/bin/echo", "--name", "\"world\""]
    );
    assert_eq!(plan.fixtures()[1].command, vec!["/bin/echo"]);
    assert_eq!(plan.unmatched_manifest_entries(), ["ghost".to_string()]);
    assert_eq!(
        plan.manifest_path(),
        Some(tests_dir.path().join("tests.json").as_path())
    );
}

#[rstest]
fn prepare_uses_manifest_override(tests_dir: TempDir) {
    write(&tests_dir, "args-test.in", b"");
    let other = TempDir::new().unwrap();
    let manifest = other.path().join("params.json");
    fs::write(&manifest, r#"{"args test": {"-n": 1}}"#).unwrap();

    let config = RunConfig::new(tests_dir.path(), argv(&["/bin/echo", "@"]))
        .with_manifest(Some(manifest.clone()));
    assert_eq!(config.manifest_path(), manifest);

    let plan = Runner::new(config).prepare().unwrap();
    assert_eq!(plan.fixtures()[0].command, vec!["/bin/echo", "-n", "1"]);
}

#[rstest]
fn prepare_without_manifest_has_no_manifest_path(tests_dir: TempDir) {
    write(&tests_dir, "a.in", b"");
    let config = RunConfig::new(tests_dir.path(), argv(&["/bin/cat", "@"]));
    let plan = Runner::new(config).prepare().unwrap();
    assert!(plan.manifest_path().is_none());
    assert_eq!(plan.fixtures()[0].command, vec!["/bin/cat"]);
}

#[rstest]
#[tokio::test]
async fn echo_hello_passes_with_cat(tests_dir: TempDir) {
    write(&tests_dir, "echo-hello.in", b"hello\n");
    write(&tests_dir, "echo-hello.out", b"hello\n");
    let config = RunConfig::new(tests_dir.path(), argv(&["/bin/cat"]));
    let plan = Runner::new(config).prepare().unwrap();

    let (summary, cases) = run_all(&plan, 2).await;

    assert!(summary.all_passed());
    assert_eq!(summary.total, 1);
    assert_eq!(cases[0].name, "echo hello");
}

#[rstest]
#[tokio::test]
async fn fixtures_without_expected_files_pass_only_when_silent(tests_dir: TempDir) {
    write(&tests_dir, "quiet.in", b"");
    write(&tests_dir, "noisy.in", b"chatter\n");
    let config = RunConfig::new(tests_dir.path(), argv(&["/bin/cat"]));
    let plan = Runner::new(config).prepare().unwrap();

    let (summary, cases) = run_all(&plan, 2).await;

    assert_eq!(summary.total, 2);
    assert_eq!(summary.passed, 1);
    let noisy = cases.iter().find(|c| c.name == "noisy").unwrap();
    assert!(!noisy.passed());
    let quiet = cases.iter().find(|c| c.name == "quiet").unwrap();
    assert!(quiet.passed());
}

#[rstest]
#[tokio::test]
async fn crlf_expected_file_needs_to_unix(tests_dir: TempDir) {
    write(&tests_dir, "crlf.in", b"line\n");
    write(&tests_dir, "crlf.out", b"line\r\n");

    let exact = RunConfig::new(tests_dir.path(), argv(&["/bin/cat"]));
    let plan = Runner::new(exact.clone()).prepare().unwrap();
    let (summary, _) = run_all(&plan, 1).await;
    assert!(!summary.all_passed());

    let unix = exact.with_normalization(Normalization::new(true, false));
    let plan = Runner::new(unix).prepare().unwrap();
    let (summary, _) = run_all(&plan, 1).await;
    assert!(summary.all_passed());
}

#[rstest]
#[tokio::test]
async fn stderr_is_compared_independently(tests_dir: TempDir) {
    write(&tests_dir, "warn.in", b"");
    write(&tests_dir, "warn.out", b"out\n");
    write(&tests_dir, "warn.err", b"err\n");
    let config = RunConfig::new(
        tests_dir.path(),
        argv(&["/bin/sh", "-c", "echo out; echo err >&2"]),
    );
    let plan = Runner::new(config).prepare().unwrap();

    let (summary, _) = run_all(&plan, 1).await;
    assert!(summary.all_passed());
}

#[rstest]
#[tokio::test]
async fn exit_code_does_not_affect_verdict(tests_dir: TempDir) {
    write(&tests_dir, "crash.in", b"");
    write(&tests_dir, "crash.out", b"bye\n");
    let config = RunConfig::new(
        tests_dir.path(),
        argv(&["/bin/sh", "-c", "echo bye; kill -9 $$"]),
    );
    let plan = Runner::new(config).prepare().unwrap();

    let (summary, cases) = run_all(&plan, 1).await;
    assert!(summary.all_passed());
    assert!(matches!(
        cases[0].outcome,
        CaseOutcome::Completed { exit_code: None, .. }
    ));
}

#[rstest]
#[tokio::test]
async fn results_arrive_in_discovery_order(tests_dir: TempDir) {
    // Earlier fixtures sleep longer so they finish last
    for (name, delay) in [("a", "0.3"), ("b", "0.2"), ("c", "0.1"), ("d", "0")] {
        write(&tests_dir, &format!("{name}.in"), delay.as_bytes());
    }
    let config = RunConfig::new(
        tests_dir.path(),
        argv(&["/bin/sh", "-c", "read d; sleep $d"]),
    );
    let plan = Runner::new(config).prepare().unwrap();

    let (summary, cases) = run_all(&plan, 4).await;

    assert!(summary.all_passed());
    let names: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d"]);
}

#[rstest]
#[tokio::test]
async fn mismatch_keeps_normalized_content(tests_dir: TempDir) {
    write(&tests_dir, "trim.in", b"value   \n\n");
    write(&tests_dir, "trim.out", b"other\n");
    let config = RunConfig::new(tests_dir.path(), argv(&["/bin/cat"]))
        .with_normalization(Normalization::new(false, true));
    let plan = Runner::new(config).prepare().unwrap();

    let (_, cases) = run_all(&plan, 1).await;
    match &cases[0].outcome {
        CaseOutcome::Completed { stdout, .. } => assert_eq!(
            stdout,
            &StreamVerdict::Mismatch {
                expected: b"other".to_vec(),
                received: b"value".to_vec(),
            }
        ),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn unreadable_input_fails_only_that_case(tests_dir: TempDir) {
    write(&tests_dir, "good.in", b"");
    write(&tests_dir, "vanishing.in", b"");
    let config = RunConfig::new(tests_dir.path(), argv(&["/bin/cat"]));
    let plan = Runner::new(config).prepare().unwrap();
    fs::remove_file(tests_dir.path().join("vanishing.in")).unwrap();

    let (summary, cases) = run_all(&plan, 2).await;

    assert_eq!(summary.total, 2);
    assert_eq!(summary.passed, 1);
    assert!(cases[0].passed());
    assert!(matches!(
        cases[1].outcome,
        CaseOutcome::Failed(ref msg) if msg.contains("vanishing.in")
    ));
}

#[rstest]
#[tokio::test]
async fn empty_directory_runs_nothing(tests_dir: TempDir) {
    let config = RunConfig::new(tests_dir.path(), argv(&["/bin/cat"]));
    let plan = Runner::new(config).prepare().unwrap();
    assert!(plan.is_empty());

    let (summary, cases) = run_all(&plan, 1).await;
    assert!(cases.is_empty());
    assert_eq!(summary, RunSummary { total: 0, passed: 0 });
    assert!(summary.all_passed());
}
