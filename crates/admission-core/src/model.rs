//! Input data model for admission evaluation.
//!
//! These are the immutable values the engine receives from the assessment
//! subsystem: one student's outcome per assignment, grouped by student and
//! course for batch evaluation.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category tag on graded work, used to group results for rule evaluation.
///
/// Tags are matched case-insensitively wherever they are read, in criteria
/// and in result files alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentType {
    Homework,
    Testat,
    Seminar,
    Project,
    Other,
}

impl AssignmentType {
    /// Every known assignment type, in declaration order.
    pub const ALL: [AssignmentType; 5] = [
        AssignmentType::Homework,
        AssignmentType::Testat,
        AssignmentType::Seminar,
        AssignmentType::Project,
        AssignmentType::Other,
    ];

    /// The persisted tag for this type (e.g. `"HOMEWORK"`).
    pub fn as_tag(self) -> &'static str {
        match self {
            AssignmentType::Homework => "HOMEWORK",
            AssignmentType::Testat => "TESTAT",
            AssignmentType::Seminar => "SEMINAR",
            AssignmentType::Project => "PROJECT",
            AssignmentType::Other => "OTHER",
        }
    }
}

impl fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for AssignmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HOMEWORK" => Ok(AssignmentType::Homework),
            "TESTAT" => Ok(AssignmentType::Testat),
            "SEMINAR" => Ok(AssignmentType::Seminar),
            "PROJECT" => Ok(AssignmentType::Project),
            "OTHER" => Ok(AssignmentType::Other),
            other => Err(format!("unknown assignment type: {other}")),
        }
    }
}

impl<'de> Deserialize<'de> for AssignmentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

/// One student's outcome on one assignment.
///
/// `achieved_percent` is not clamped: bonus points may push it above 100.
/// `passed` already reflects the assignment's own pass threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResult {
    pub assignment_id: String,
    pub assignment_type: AssignmentType,
    pub achieved_percent: f64,
    pub passed: bool,
}

impl AssignmentResult {
    pub fn new(
        assignment_id: impl Into<String>,
        assignment_type: AssignmentType,
        achieved_percent: f64,
        passed: bool,
    ) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            assignment_type,
            achieved_percent,
            passed,
        }
    }
}

/// All assignment results of one student within one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResults {
    pub student_id: String,
    #[serde(default)]
    pub results: Vec<AssignmentResult>,
}

/// Assignment results of every student of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResults {
    pub course_id: String,
    #[serde(default)]
    pub students: Vec<StudentResults>,
}
