//! The `admission compare` command.

use std::path::PathBuf;

use anyhow::Result;

use admission_core::report::CourseAdmissionReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    format: String,
    fail_on_new_denials: bool,
) -> Result<()> {
    let baseline = CourseAdmissionReport::load_json(&baseline_path)?;
    let current = CourseAdmissionReport::load_json(&current_path)?;

    if baseline.course_id != current.course_id {
        tracing::warn!(
            "comparing reports of different courses: {} vs {}",
            baseline.course_id,
            current.course_id
        );
    }

    let report = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} newly denied, {} newly admitted, {} unchanged",
                report.newly_denied.len(),
                report.newly_admitted.len(),
                report.unchanged
            );
            if report.criteria_changed {
                println!("Admission criteria differ between the two reports.");
            }

            if !report.newly_denied.is_empty() {
                println!("\nNewly denied:");
                for change in &report.newly_denied {
                    println!("  {}", change.student_id);
                    for reason in &change.denied_by {
                        println!("    {reason}");
                    }
                }
            }

            if !report.newly_admitted.is_empty() {
                println!("\nNewly admitted:");
                for change in &report.newly_admitted {
                    println!("  {}", change.student_id);
                }
            }

            if report.new_students > 0 {
                println!("\n{} new student(s)", report.new_students);
            }
            if report.removed_students > 0 {
                println!("{} removed student(s)", report.removed_students);
            }
        }
    }

    if fail_on_new_denials && report.has_new_denials() {
        std::process::exit(1);
    }

    Ok(())
}
