//! Near-miss example: find denied students close to a threshold.
//!
//! Loads a report written by `admission batch` and lists every failed rule
//! whose rounded value is within a margin of the required percentage.
//!
//! ```bash
//! cargo run -p admission-core --example near_misses -- admission-results/admission-report.json 5
//! ```

use std::env;
use std::path::Path;

use anyhow::Context;

use admission_core::report::CourseAdmissionReport;
use admission_core::verdict::RuleDetails;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let report_path = args
        .get(1)
        .context("usage: near_misses <admission-report.json> [margin]")?;
    let margin: f64 = match args.get(2) {
        Some(value) => value.parse().context("margin must be a number")?,
        None => 5.0,
    };

    let report = CourseAdmissionReport::load_json(Path::new(report_path))?;
    println!(
        "Course {}: {} students, {} denied",
        report.course_id, report.summary.total, report.summary.denied
    );
    println!("\nFailed rules within {margin} points of the threshold:\n");
    println!("{:<20} {:<6} {:>10} {:>10}", "Student", "Rule", "Achieved", "Required");
    println!("{}", "-".repeat(50));

    let mut found = 0;
    for student in &report.students {
        for rule in student.verdict.failed_rules() {
            // A rule failing only on its pass count has no average to report.
            let (achieved, required) = match &rule.details {
                RuleDetails::RequiredPercentOverall {
                    rounded_percent,
                    required_percent,
                    ..
                } => (*rounded_percent, *required_percent),
                RuleDetails::PassedXPercentWithAtLeastYPercent {
                    achieved_rounded,
                    required_percent,
                    achieved_met: false,
                    ..
                } => (*achieved_rounded, *required_percent),
                RuleDetails::PassedXPercentWithAtLeastYPercent { .. } => continue,
            };
            if required - achieved <= margin {
                found += 1;
                println!(
                    "{:<20} {:<6} {:>9.2}% {:>9.2}%",
                    student.student_id, rule.rule_index, achieved, required
                );
            }
        }
    }

    if found == 0 {
        println!("(none)");
    }

    Ok(())
}
