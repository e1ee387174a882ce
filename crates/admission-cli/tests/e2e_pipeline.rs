//! End-to-end pipeline tests: batch-evaluate a course under two criteria
//! sets, then compare the resulting reports through the CLI.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use admission_core::report::CourseAdmissionReport;

fn admission() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("admission").unwrap()
}

/// Run `admission batch` into `out` and return the JSON report path.
fn run_batch(criteria: &str, out: &Path) -> PathBuf {
    admission()
        .arg("batch")
        .arg("--criteria")
        .arg(format!("../../fixtures/criteria/{criteria}"))
        .arg("--results")
        .arg("../../fixtures/results/course.json")
        .arg("--output")
        .arg(out)
        .arg("--format")
        .arg("json")
        .assert()
        .success();
    out.join("admission-report.json")
}

#[test]
fn e2e_batch_report_contents() {
    let dir = TempDir::new().unwrap();
    let path = run_batch("basic.json", dir.path());
    let report = CourseAdmissionReport::load_json(&path).unwrap();

    assert_eq!(report.course_id, "java-wise2425");
    let ids: Vec<_> = report.students.iter().map(|s| s.student_id.as_str()).collect();
    assert_eq!(ids, vec!["alice", "bob", "carol", "dave", "erin"]);

    let admitted: Vec<_> = report
        .students
        .iter()
        .filter(|s| s.verdict.admitted)
        .map(|s| s.student_id.as_str())
        .collect();
    assert_eq!(admitted, vec!["alice", "bob", "erin"]);

    assert_eq!(report.summary.total, 5);
    assert_eq!(report.summary.denied, 2);
    // carol has no TESTAT results
    assert_eq!(report.summary.with_warnings, 1);
    assert_eq!(report.summary.rules[0].passed, 4);
    assert_eq!(report.summary.rules[1].failed, 2);
}

#[test]
fn e2e_stricter_criteria_are_detected_as_new_denials() {
    let dir = TempDir::new().unwrap();
    let baseline = run_batch("basic.json", &dir.path().join("baseline"));
    let current = run_batch("strict.toml", &dir.path().join("current"));

    admission()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 newly denied, 0 newly admitted, 3 unchanged"))
        .stdout(predicate::str::contains("Admission criteria differ"))
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("bob"));

    admission()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .arg("--fail-on-new-denials")
        .assert()
        .code(1);
}

#[test]
fn e2e_relaxed_criteria_do_not_fail_the_gate() {
    let dir = TempDir::new().unwrap();
    let baseline = run_batch("strict.toml", &dir.path().join("baseline"));
    let current = run_batch("basic.json", &dir.path().join("current"));

    admission()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .arg("--format")
        .arg("markdown")
        .arg("--fail-on-new-denials")
        .assert()
        .success()
        .stdout(predicate::str::contains("### Newly admitted"))
        .stdout(predicate::str::contains("| alice |"));
}

#[test]
fn e2e_compare_json_output() {
    let dir = TempDir::new().unwrap();
    let baseline = run_batch("basic.json", &dir.path().join("a"));
    let current = run_batch("basic.json", &dir.path().join("b"));

    let output = admission()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let changes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(changes["unchanged"], 5);
    assert_eq!(changes["criteriaChanged"], false);
    assert_eq!(changes["newlyDenied"].as_array().map(Vec::len), Some(0));
}
