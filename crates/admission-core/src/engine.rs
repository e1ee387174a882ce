//! Admission composer and course batch orchestrator.
//!
//! [`evaluate`] runs every configured rule against one student's results and
//! combines the outcomes by strict conjunction. [`AdmissionEngine`] holds a
//! course's criteria and evaluates whole courses in parallel.

use std::time::Instant;

use rayon::prelude::*;

use crate::aggregate::{AggregateCache, TypeAggregate};
use crate::model::{AssignmentResult, CourseResults};
use crate::report::{CourseAdmissionReport, StudentVerdict};
use crate::rules::AdmissionCriteria;
use crate::traits::BatchObserver;
use crate::verdict::{AdmissionVerdict, DataQualityWarning, RuleResult};

/// Evaluate one student's results against a course's admission criteria.
///
/// Every rule is evaluated, in configured order, even after one has failed,
/// so the verdict explains all of them. Empty criteria admit unconditionally.
pub fn evaluate(criteria: &AdmissionCriteria, results: &[AssignmentResult]) -> AdmissionVerdict {
    if criteria.is_empty() {
        return AdmissionVerdict::unconditional();
    }

    let mut cache = AggregateCache::new(results);
    let details: Vec<RuleResult> = criteria
        .rules()
        .iter()
        .enumerate()
        .map(|(rule_index, rule)| {
            let aggregate = cache.get(rule.assignment_type());
            let outcome = rule.evaluate(aggregate);
            let warnings = data_quality_warnings(aggregate);

            tracing::debug!(
                "rule {rule_index} {} [{}]: passed={} ({} results)",
                rule.kind(),
                rule.assignment_type(),
                outcome.passed,
                aggregate.assignment_count
            );

            RuleResult {
                rule_index,
                rule: rule.kind(),
                assignment_type: rule.assignment_type(),
                passed: outcome.passed,
                details: outcome.details,
                warnings,
            }
        })
        .collect();

    AdmissionVerdict {
        admitted: details.iter().all(|r| r.passed),
        details,
    }
}

fn data_quality_warnings(aggregate: &TypeAggregate) -> Vec<DataQualityWarning> {
    let mut warnings = Vec::new();
    if !aggregate.has_data() {
        warnings.push(DataQualityWarning::NoMatchingAssignments {
            assignment_type: aggregate.assignment_type,
        });
    }
    if !aggregate.out_of_range.is_empty() {
        warnings.push(DataQualityWarning::PercentOutOfRange {
            assignment_ids: aggregate.out_of_range.clone(),
        });
    }
    warnings
}

/// A course's admission criteria, ready to evaluate students.
#[derive(Debug, Clone, Default)]
pub struct AdmissionEngine {
    criteria: AdmissionCriteria,
}

impl AdmissionEngine {
    pub fn new(criteria: AdmissionCriteria) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &AdmissionCriteria {
        &self.criteria
    }

    /// Evaluate a single student.
    pub fn evaluate(&self, results: &[AssignmentResult]) -> AdmissionVerdict {
        evaluate(&self.criteria, results)
    }

    /// Evaluate every student of a course.
    ///
    /// Students are evaluated in parallel on the current rayon pool; the
    /// report lists them in input order. The observer is called from worker
    /// threads as each student finishes.
    pub fn evaluate_course(
        &self,
        course: &CourseResults,
        observer: &dyn BatchObserver,
    ) -> CourseAdmissionReport {
        let start = Instant::now();

        let students: Vec<StudentVerdict> = course
            .students
            .par_iter()
            .map(|student| {
                let verdict = self.evaluate(&student.results);
                for warning in verdict.warnings() {
                    tracing::warn!(
                        "course {} student {}: {}",
                        course.course_id,
                        student.student_id,
                        warning.message()
                    );
                }
                let student_verdict = StudentVerdict {
                    student_id: student.student_id.clone(),
                    verdict,
                };
                observer.on_student_evaluated(&student_verdict);
                student_verdict
            })
            .collect();

        let elapsed = start.elapsed();
        let report = CourseAdmissionReport::new(
            course.course_id.clone(),
            self.criteria.clone(),
            students,
            elapsed,
        );

        tracing::info!(
            "course {}: {} of {} students admitted in {}ms",
            report.course_id,
            report.summary.admitted,
            report.summary.total,
            report.duration_ms
        );
        observer.on_batch_complete(report.summary.total, report.summary.admitted, elapsed);

        report
    }
}
