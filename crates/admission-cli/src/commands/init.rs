//! The `admission init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create admission.toml
    if std::path::Path::new("admission.toml").exists() {
        println!("admission.toml already exists, skipping.");
    } else {
        std::fs::write("admission.toml", SAMPLE_CONFIG)?;
        println!("Created admission.toml");
    }

    // Create example criteria
    std::fs::create_dir_all("criteria")?;
    let example_path = std::path::Path::new("criteria/example.json");
    if example_path.exists() {
        println!("criteria/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CRITERIA)?;
        println!("Created criteria/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit criteria/example.json to match your course's admission rules");
    println!("  2. Run: admission validate --criteria criteria/example.json");
    println!("  3. Run: admission batch --criteria criteria/example.json --results course.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# admission configuration

output_dir = "./admission-results"
parallelism = 4
# json, html, markdown or all
default_format = "json"
# used when RUST_LOG is not set
log_level = "admission=info"
"#;

const EXAMPLE_CRITERIA: &str = r#"{
  "rules": [
    {
      "type": "REQUIRED_PERCENT_OVERALL",
      "assignmentType": "HOMEWORK",
      "requiredPercent": 50,
      "achievedPercentRounding": { "type": "UP_NEAREST_INTEGER" }
    },
    {
      "type": "REQUIRED_PERCENT_OVERALL",
      "assignmentType": "TESTAT",
      "requiredPercent": 50,
      "achievedPercentRounding": { "type": "DECIMALS", "decimals": 0 }
    },
    {
      "type": "PASSED_X_PERCENT_WITH_AT_LEAST_Y_PERCENT",
      "assignmentType": "HOMEWORK",
      "requiredPercent": 50,
      "achievedPercentRounding": { "type": "NONE" },
      "passedAssignmentsPercent": 70,
      "passedAssignmentsRounding": { "type": "DOWN_NEAREST_INTEGER" }
    }
  ]
}
"#;
