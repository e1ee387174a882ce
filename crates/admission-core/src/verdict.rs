//! Verdict and explanation types produced by an evaluation.
//!
//! A verdict is created fresh for every call and carries the concrete values
//! behind every rule outcome: the raw aggregate, the rounded value that was
//! actually compared, and the threshold it was compared against.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::AssignmentType;
use crate::rounding::RoundingPolicy;

/// The kind of rule a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    RequiredPercentOverall,
    PassedXPercentWithAtLeastYPercent,
}

impl RuleKind {
    /// The persisted tag for this kind.
    pub fn as_tag(self) -> &'static str {
        match self {
            RuleKind::RequiredPercentOverall => "REQUIRED_PERCENT_OVERALL",
            RuleKind::PassedXPercentWithAtLeastYPercent => {
                "PASSED_X_PERCENT_WITH_AT_LEAST_Y_PERCENT"
            }
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Computed values behind one rule outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum RuleDetails {
    RequiredPercentOverall {
        assignment_count: usize,
        achieved_percent: f64,
        rounding: RoundingPolicy,
        rounded_percent: f64,
        required_percent: f64,
    },
    PassedXPercentWithAtLeastYPercent {
        assignment_count: usize,
        passed_count: usize,
        achieved_percent: f64,
        achieved_percent_rounding: RoundingPolicy,
        achieved_rounded: f64,
        required_percent: f64,
        achieved_met: bool,
        passed_percent: f64,
        passed_assignments_rounding: RoundingPolicy,
        passed_rounded: f64,
        passed_assignments_percent: f64,
        passed_met: bool,
    },
}

/// Non-fatal data problems noticed while evaluating a rule.
///
/// The rule is still evaluated; these exist so that a human reviewer sees
/// why a student failed on thin or suspicious evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum DataQualityWarning {
    /// The rule's assignment type had no results; percentages were taken as 0.
    NoMatchingAssignments { assignment_type: AssignmentType },
    /// Some results fall outside `[0, 100]` and were averaged unclamped.
    PercentOutOfRange { assignment_ids: Vec<String> },
}

impl DataQualityWarning {
    pub fn message(&self) -> String {
        match self {
            DataQualityWarning::NoMatchingAssignments { assignment_type } => format!(
                "no {assignment_type} assignments found; treated as 0%"
            ),
            DataQualityWarning::PercentOutOfRange { assignment_ids } => format!(
                "achieved percent outside 0-100 for: {}",
                assignment_ids.join(", ")
            ),
        }
    }
}

/// Outcome of a single configured rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    /// Position of the rule in the course's criteria.
    pub rule_index: usize,
    pub rule: RuleKind,
    pub assignment_type: AssignmentType,
    pub passed: bool,
    pub details: RuleDetails,
    #[serde(default)]
    pub warnings: Vec<DataQualityWarning>,
}

impl RuleResult {
    /// One-line human-readable explanation of this outcome.
    pub fn summary(&self) -> String {
        let verdict = if self.passed { "passed" } else { "failed" };
        let body = match &self.details {
            RuleDetails::RequiredPercentOverall {
                achieved_percent,
                rounding,
                rounded_percent,
                required_percent,
                ..
            } => format!(
                "average {:.2}% ({rounding}: {}%) against required {}%",
                achieved_percent, rounded_percent, required_percent
            ),
            RuleDetails::PassedXPercentWithAtLeastYPercent {
                passed_count,
                assignment_count,
                achieved_percent,
                achieved_percent_rounding,
                achieved_rounded,
                required_percent,
                passed_percent,
                passed_assignments_rounding,
                passed_rounded,
                passed_assignments_percent,
                ..
            } => format!(
                "average {:.2}% ({achieved_percent_rounding}: {}%) against required {}%; \
                 passed {passed_count}/{assignment_count} = {:.2}% ({passed_assignments_rounding}: {}%) \
                 against required {}%",
                achieved_percent,
                achieved_rounded,
                required_percent,
                passed_percent,
                passed_rounded,
                passed_assignments_percent
            ),
        };
        format!(
            "rule {} {} [{}]: {} ({})",
            self.rule_index, self.rule, self.assignment_type, verdict, body
        )
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// The engine's decision for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionVerdict {
    pub admitted: bool,
    /// One entry per configured rule, in configured order.
    pub details: Vec<RuleResult>,
}

impl AdmissionVerdict {
    /// The verdict for a course without admission requirements.
    pub fn unconditional() -> Self {
        Self {
            admitted: true,
            details: Vec::new(),
        }
    }

    /// Rules the student did not satisfy.
    pub fn failed_rules(&self) -> impl Iterator<Item = &RuleResult> {
        self.details.iter().filter(|r| !r.passed)
    }

    /// All data-quality warnings across rules.
    pub fn warnings(&self) -> impl Iterator<Item = &DataQualityWarning> {
        self.details.iter().flat_map(|r| r.warnings.iter())
    }

    pub fn has_warnings(&self) -> bool {
        self.details.iter().any(RuleResult::has_warnings)
    }

    /// Explanation lines: one per rule, followed by its warnings.
    pub fn explanation(&self) -> Vec<String> {
        if self.details.is_empty() {
            return vec!["no admission criteria configured".to_string()];
        }
        let mut lines = Vec::new();
        for result in &self.details {
            lines.push(result.summary());
            for warning in &result.warnings {
                lines.push(format!("  warning: {}", warning.message()));
            }
        }
        lines
    }

    pub fn summary(&self) -> String {
        let failed = self.failed_rules().count();
        match (self.admitted, self.details.len()) {
            (true, 0) => "admitted (no admission criteria)".to_string(),
            (true, n) => format!("admitted ({n} of {n} rules passed)"),
            (false, n) => format!("not admitted ({failed} of {n} rules failed)"),
        }
    }
}
