//! Quick eval example: minimal programmatic usage of admission-core.
//!
//! Decodes a course configuration, evaluates two students against it and
//! prints every rule's explanation.
//!
//! ```bash
//! cargo run -p admission-core --example quick_eval
//! ```

use admission_core::parser::parse_course_config_json;
use admission_core::{evaluate, AssignmentResult, AssignmentType};

const COURSE_CONFIG: &str = r#"{
  "id": 4711,
  "admissionCriteria": {
    "rules": [
      {
        "type": "REQUIRED_PERCENT_OVERALL",
        "assignmentType": "HOMEWORK",
        "requiredPercent": 70,
        "achievedPercentRounding": { "type": "DOWN_NEAREST_INTEGER" }
      },
      {
        "type": "PASSED_X_PERCENT_WITH_AT_LEAST_Y_PERCENT",
        "assignmentType": "TESTAT",
        "requiredPercent": 50,
        "achievedPercentRounding": { "type": "NONE" },
        "passedAssignmentsPercent": 50,
        "passedAssignmentsRounding": { "type": "UP_NEAREST_INTEGER" }
      }
    ]
  }
}"#;

fn main() -> anyhow::Result<()> {
    let config = parse_course_config_json(COURSE_CONFIG)?;
    let criteria = config.criteria();
    println!(
        "Course {}: {} admission rules",
        config.id.as_deref().unwrap_or("?"),
        criteria.len()
    );

    let students = [
        (
            "alice",
            vec![
                AssignmentResult::new("hw1", AssignmentType::Homework, 58.3, false),
                AssignmentResult::new("hw2", AssignmentType::Homework, 70.1, true),
                AssignmentResult::new("hw3", AssignmentType::Homework, 81.6, true),
                AssignmentResult::new("t1", AssignmentType::Testat, 90.0, true),
            ],
        ),
        (
            "bob",
            vec![AssignmentResult::new("hw1", AssignmentType::Homework, 95.0, true)],
        ),
    ];

    for (student, results) in &students {
        let verdict = evaluate(&criteria, results);
        let status = if verdict.admitted { "ADMITTED" } else { "DENIED" };
        println!("\n{student}: {status}");
        for rule in &verdict.details {
            println!("  {}", rule.summary());
        }
        for warning in verdict.warnings() {
            println!("  warning: {}", warning.message());
        }
    }

    Ok(())
}
