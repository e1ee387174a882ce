//! Course admission reports with JSON persistence and change detection.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::AssignmentType;
use crate::rules::AdmissionCriteria;
use crate::verdict::{AdmissionVerdict, RuleKind};

/// One student's verdict within a course report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentVerdict {
    pub student_id: String,
    pub verdict: AdmissionVerdict,
}

/// The outcome of evaluating a whole course.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAdmissionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub course_id: String,
    /// The criteria the students were evaluated against.
    pub criteria: AdmissionCriteria,
    /// Per-student verdicts, in input order.
    pub students: Vec<StudentVerdict>,
    pub summary: AdmissionSummary,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Counts over a course report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionSummary {
    pub total: usize,
    pub admitted: usize,
    pub denied: usize,
    /// Students whose verdict carries at least one data-quality warning.
    pub with_warnings: usize,
    /// Pass/fail counts per configured rule.
    pub rules: Vec<RuleSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSummary {
    pub rule_index: usize,
    pub rule: RuleKind,
    pub assignment_type: AssignmentType,
    pub passed: usize,
    pub failed: usize,
}

impl AdmissionSummary {
    pub fn compute(criteria: &AdmissionCriteria, students: &[StudentVerdict]) -> Self {
        let mut rules: Vec<RuleSummary> = criteria
            .rules()
            .iter()
            .enumerate()
            .map(|(rule_index, rule)| RuleSummary {
                rule_index,
                rule: rule.kind(),
                assignment_type: rule.assignment_type(),
                passed: 0,
                failed: 0,
            })
            .collect();

        let mut admitted = 0;
        let mut with_warnings = 0;
        for student in students {
            if student.verdict.admitted {
                admitted += 1;
            }
            if student.verdict.has_warnings() {
                with_warnings += 1;
            }
            for result in &student.verdict.details {
                if let Some(summary) = rules.get_mut(result.rule_index) {
                    if result.passed {
                        summary.passed += 1;
                    } else {
                        summary.failed += 1;
                    }
                }
            }
        }

        Self {
            total: students.len(),
            admitted,
            denied: students.len() - admitted,
            with_warnings,
            rules,
        }
    }

    /// Share of admitted students in percent, 0 for an empty course.
    pub fn admission_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.admitted as f64 * 100.0 / self.total as f64
        }
    }
}

impl CourseAdmissionReport {
    pub fn new(
        course_id: String,
        criteria: AdmissionCriteria,
        students: Vec<StudentVerdict>,
        elapsed: Duration,
    ) -> Self {
        let summary = AdmissionSummary::compute(&criteria, &students);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            course_id,
            criteria,
            students,
            summary,
            duration_ms: elapsed.as_millis() as u64,
        }
    }

    /// Look up a student's verdict by id.
    pub fn student(&self, student_id: &str) -> Option<&StudentVerdict> {
        self.students.iter().find(|s| s.student_id == student_id)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: CourseAdmissionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against a baseline to find students whose
    /// admission status changed.
    pub fn compare(&self, baseline: &CourseAdmissionReport) -> AdmissionChangeReport {
        let baseline_by_id: HashMap<&str, &AdmissionVerdict> = baseline
            .students
            .iter()
            .map(|s| (s.student_id.as_str(), &s.verdict))
            .collect();

        let mut newly_admitted = Vec::new();
        let mut newly_denied = Vec::new();
        let mut unchanged = 0usize;
        let mut new_students = 0usize;

        for student in &self.students {
            let Some(before) = baseline_by_id.get(student.student_id.as_str()) else {
                new_students += 1;
                continue;
            };
            match (before.admitted, student.verdict.admitted) {
                (false, true) => newly_admitted.push(AdmissionChange::new(
                    &student.student_id,
                    before,
                )),
                (true, false) => newly_denied.push(AdmissionChange::new(
                    &student.student_id,
                    &student.verdict,
                )),
                _ => unchanged += 1,
            }
        }

        let current_ids: std::collections::HashSet<&str> =
            self.students.iter().map(|s| s.student_id.as_str()).collect();
        let removed_students = baseline
            .students
            .iter()
            .filter(|s| !current_ids.contains(s.student_id.as_str()))
            .count();

        AdmissionChangeReport {
            criteria_changed: baseline.criteria != self.criteria,
            newly_admitted,
            newly_denied,
            unchanged,
            new_students,
            removed_students,
        }
    }
}

/// Result of comparing two course reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionChangeReport {
    /// Whether the two reports were produced from different criteria.
    pub criteria_changed: bool,
    /// Students denied in the baseline and admitted now.
    pub newly_admitted: Vec<AdmissionChange>,
    /// Students admitted in the baseline and denied now.
    pub newly_denied: Vec<AdmissionChange>,
    pub unchanged: usize,
    /// Students in current but not baseline.
    pub new_students: usize,
    /// Students in baseline but not current.
    pub removed_students: usize,
}

/// A student whose admission status flipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionChange {
    pub student_id: String,
    /// Failed rules of the denying verdict (current for new denials,
    /// baseline for new admissions).
    pub denied_by: Vec<String>,
}

impl AdmissionChange {
    fn new(student_id: &str, denying: &AdmissionVerdict) -> Self {
        Self {
            student_id: student_id.to_string(),
            denied_by: denying.failed_rules().map(|r| r.summary()).collect(),
        }
    }
}

impl AdmissionChangeReport {
    /// Format the change report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} newly denied, {} newly admitted, {} unchanged\n\n",
            self.newly_denied.len(),
            self.newly_admitted.len(),
            self.unchanged
        ));
        if self.criteria_changed {
            md.push_str("_Admission criteria differ between the two reports._\n\n");
        }
        if self.new_students > 0 || self.removed_students > 0 {
            md.push_str(&format!(
                "{} new students, {} removed students\n\n",
                self.new_students, self.removed_students
            ));
        }

        if !self.newly_denied.is_empty() {
            md.push_str("### Newly denied\n\n");
            md.push_str("| Student | Failed rules |\n");
            md.push_str("|---------|--------------|\n");
            for change in &self.newly_denied {
                md.push_str(&format!(
                    "| {} | {} |\n",
                    change.student_id,
                    change.denied_by.join("<br>")
                ));
            }
            md.push('\n');
        }

        if !self.newly_admitted.is_empty() {
            md.push_str("### Newly admitted\n\n");
            md.push_str("| Student | Previously failed rules |\n");
            md.push_str("|---------|-------------------------|\n");
            for change in &self.newly_admitted {
                md.push_str(&format!(
                    "| {} | {} |\n",
                    change.student_id,
                    change.denied_by.join("<br>")
                ));
            }
        }

        md
    }

    /// Returns true if any previously admitted student is now denied.
    pub fn has_new_denials(&self) -> bool {
        !self.newly_denied.is_empty()
    }
}
