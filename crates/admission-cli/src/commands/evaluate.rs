//! The `admission evaluate` command.

use std::path::PathBuf;

use anyhow::Result;

use admission_core::parser::{load_criteria, load_student_results};
use admission_core::AdmissionEngine;

use crate::config::OutputFormat;

pub fn execute(
    criteria_path: PathBuf,
    results_path: PathBuf,
    format: OutputFormat,
    fail_on_denied: bool,
) -> Result<()> {
    let criteria = load_criteria(&criteria_path)?;
    let student = load_student_results(&results_path)?;

    let engine = AdmissionEngine::new(criteria);
    let verdict = engine.evaluate(&student.results);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }
        OutputFormat::Text => {
            println!("Student {}: {}", student.student_id, verdict.summary());
            for line in verdict.explanation() {
                println!("  {line}");
            }
        }
    }

    if fail_on_denied && !verdict.admitted {
        std::process::exit(1);
    }

    Ok(())
}
