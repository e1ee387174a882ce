//! The `admission validate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use admission_core::parser::{criteria_files_in, load_criteria, validate_criteria};

pub fn execute(criteria_path: PathBuf) -> Result<()> {
    if !criteria_path.is_dir() {
        let warnings = check_file(&criteria_path)?;
        if warnings == 0 {
            println!("Admission criteria valid.");
        } else {
            println!("\n{warnings} warning(s) found.");
        }
        return Ok(());
    }

    let files = criteria_files_in(&criteria_path)?;
    let mut total_warnings = 0;
    let mut invalid = 0;

    for file in &files {
        match check_file(file) {
            Ok(warnings) => total_warnings += warnings,
            Err(e) => {
                println!("{}: ERROR: {e:#}", file.display());
                invalid += 1;
            }
        }
    }

    anyhow::ensure!(
        invalid == 0,
        "{invalid} of {} criteria file(s) invalid",
        files.len()
    );

    if total_warnings == 0 {
        println!("All admission criteria valid ({} files).", files.len());
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

/// Load and lint one file, printing its warnings. Returns the warning count.
fn check_file(path: &Path) -> Result<usize> {
    let criteria = load_criteria(path)?;
    println!("{}: {} rules", path.display(), criteria.len());

    let warnings = validate_criteria(&criteria);
    for w in &warnings {
        let prefix = w
            .rule_index
            .map(|i| format!("  [rule {i}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
    Ok(warnings.len())
}
