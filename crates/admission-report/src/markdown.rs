//! Markdown summary of a course admission report, suitable for pasting into
//! an issue or a course announcement draft.

use anyhow::{Context, Result};
use std::path::Path;

use admission_core::report::CourseAdmissionReport;

/// Escape characters that would break a Markdown table cell.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

pub fn generate_markdown(report: &CourseAdmissionReport) -> String {
    let summary = &report.summary;
    let mut md = String::new();

    md.push_str(&format!("# Admission report: {}\n\n", cell(&report.course_id)));
    md.push_str(&format!(
        "Generated {} (report `{}`)\n\n",
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.id
    ));
    md.push_str(&format!(
        "**Summary:** {} of {} students admitted ({:.1}%), {} denied, {} with data warnings\n\n",
        summary.admitted,
        summary.total,
        summary.admission_rate(),
        summary.denied,
        summary.with_warnings
    ));

    if report.criteria.is_empty() {
        md.push_str("No admission criteria configured; every student is admitted.\n\n");
    } else {
        md.push_str("### Rules\n\n");
        md.push_str("| # | Rule | Type | Passed | Failed |\n");
        md.push_str("|---|------|------|--------|--------|\n");
        for rule in &summary.rules {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                rule.rule_index, rule.rule, rule.assignment_type, rule.passed, rule.failed
            ));
        }
        md.push('\n');
    }

    let denied: Vec<_> = report
        .students
        .iter()
        .filter(|s| !s.verdict.admitted)
        .collect();
    if !denied.is_empty() {
        md.push_str("### Denied students\n\n");
        md.push_str("| Student | Failed rules |\n");
        md.push_str("|---------|--------------|\n");
        for student in denied {
            let reasons: Vec<_> = student
                .verdict
                .failed_rules()
                .map(|r| cell(&r.summary()))
                .collect();
            md.push_str(&format!(
                "| {} | {} |\n",
                cell(&student.student_id),
                reasons.join("<br>")
            ));
        }
        md.push('\n');
    }

    let warned: Vec<_> = report
        .students
        .iter()
        .filter(|s| s.verdict.has_warnings())
        .collect();
    if !warned.is_empty() {
        md.push_str("### Data warnings\n\n");
        for student in warned {
            for warning in student.verdict.warnings() {
                md.push_str(&format!(
                    "- **{}**: {}\n",
                    cell(&student.student_id),
                    warning.message()
                ));
            }
        }
    }

    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(report: &CourseAdmissionReport, path: &Path) -> Result<()> {
    let md = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)
        .with_context(|| format!("failed to write Markdown report to {}", path.display()))?;
    Ok(())
}
