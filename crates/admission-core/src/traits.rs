//! Core trait definitions for rule evaluators and batch observers.

use std::time::Duration;

use crate::aggregate::TypeAggregate;
use crate::model::AssignmentType;
use crate::report::StudentVerdict;
use crate::verdict::RuleDetails;

// ---------------------------------------------------------------------------
// Rule evaluator trait
// ---------------------------------------------------------------------------

/// A single admission rule kind.
///
/// Each variant of [`AdmissionRule`](crate::rules::AdmissionRule) wraps one
/// implementor; the enum dispatches to it with an exhaustive `match`, so a new
/// variant cannot compile without its evaluator.
pub trait RuleEvaluator {
    /// The assignment type whose results this rule consumes.
    fn assignment_type(&self) -> AssignmentType;

    /// Evaluate the rule against the aggregate of its assignment type.
    fn evaluate(&self, aggregate: &TypeAggregate) -> RuleOutcome;
}

/// What a rule evaluator reports back to the composer.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub passed: bool,
    pub details: RuleDetails,
}

// ---------------------------------------------------------------------------
// Batch observer trait
// ---------------------------------------------------------------------------

/// Progress reporting for course batch evaluation.
///
/// Called from rayon worker threads, hence `Send + Sync`.
pub trait BatchObserver: Send + Sync {
    fn on_student_evaluated(&self, verdict: &StudentVerdict);
    fn on_batch_complete(&self, total: usize, admitted: usize, elapsed: Duration);
}

/// No-op batch observer.
pub struct NoopObserver;

impl BatchObserver for NoopObserver {
    fn on_student_evaluated(&self, _: &StudentVerdict) {}
    fn on_batch_complete(&self, _: usize, _: usize, _: Duration) {}
}
