//! The `admission batch` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use admission_core::parser::{load_course_results, load_criteria, validate_criteria};
use admission_core::report::{CourseAdmissionReport, StudentVerdict};
use admission_core::traits::BatchObserver;
use admission_core::AdmissionEngine;
use admission_report::html::write_html_report;
use admission_report::markdown::write_markdown_report;

use crate::config::ReportFormat;

/// Console progress observer.
struct ConsoleObserver;

impl BatchObserver for ConsoleObserver {
    fn on_student_evaluated(&self, student: &StudentVerdict) {
        let status = if student.verdict.admitted {
            "ADMITTED"
        } else {
            "DENIED"
        };
        let warn = if student.verdict.has_warnings() {
            " (data warnings)"
        } else {
            ""
        };
        eprintln!("  {}: {status}{warn}", student.student_id);
    }

    fn on_batch_complete(&self, total: usize, admitted: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {admitted}/{total} admitted ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub fn execute(
    criteria_path: PathBuf,
    results_path: PathBuf,
    parallelism: usize,
    output: PathBuf,
    format: ReportFormat,
) -> Result<()> {
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");

    let criteria = load_criteria(&criteria_path)?;
    for w in validate_criteria(&criteria) {
        tracing::warn!("{}: {}", criteria_path.display(), w.message);
    }
    let course = load_course_results(&results_path)?;

    eprintln!(
        "admission v{}: evaluating {} students of {} against {} rules",
        env!("CARGO_PKG_VERSION"),
        course.students.len(),
        course.course_id,
        criteria.len()
    );
    eprintln!();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism)
        .build()
        .context("failed to build worker pool")?;

    let engine = AdmissionEngine::new(criteria);
    let report = pool.install(|| engine.evaluate_course(&course, &ConsoleObserver));

    print_summary(&report);

    std::fs::create_dir_all(&output)
        .with_context(|| format!("failed to create output directory {}", output.display()))?;

    if format.includes_json() {
        let path = output.join("admission-report.json");
        report.save_json(&path)?;
        eprintln!("Results saved to: {}", path.display());
    }
    if format.includes_html() {
        let path = output.join("admission-report.html");
        write_html_report(&report, &path)?;
        eprintln!("HTML report: {}", path.display());
    }
    if format.includes_markdown() {
        let path = output.join("admission-report.md");
        write_markdown_report(&report, &path)?;
        eprintln!("Markdown report: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &CourseAdmissionReport) {
    use comfy_table::{Cell, Table};

    let summary = &report.summary;
    let mut table = Table::new();
    table.set_header(vec!["#", "Rule", "Type", "Passed", "Failed", "Pass rate"]);

    for rule in &summary.rules {
        let rate = if summary.total == 0 {
            0.0
        } else {
            rule.passed as f64 * 100.0 / summary.total as f64
        };
        table.add_row(vec![
            Cell::new(rule.rule_index),
            Cell::new(rule.rule),
            Cell::new(rule.assignment_type),
            Cell::new(rule.passed),
            Cell::new(rule.failed),
            Cell::new(format!("{rate:.1}%")),
        ]);
    }

    eprintln!("\n{table}");
    eprintln!(
        "Admitted: {}/{} ({:.1}%), denied: {}, with data warnings: {}",
        summary.admitted,
        summary.total,
        summary.admission_rate(),
        summary.denied,
        summary.with_warnings
    );
}
