//! Per-assignment-type aggregation of a student's results.
//!
//! Aggregates are raw: no rounding happens here, because different rules
//! apply different rounding policies to the same numbers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{AssignmentResult, AssignmentType};

/// Statistics over one student's results of a single assignment type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAggregate {
    pub assignment_type: AssignmentType,
    /// Number of results of this type.
    pub assignment_count: usize,
    /// Number of those results marked as passed.
    pub passed_count: usize,
    /// Arithmetic mean of `achieved_percent`, or 0 without data.
    pub average_achieved_percent: f64,
    /// `passed_count` as a percentage of `assignment_count`, or 0 without data.
    pub passed_percent: f64,
    /// Results whose achieved percent lies outside `[0, 100]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub out_of_range: Vec<String>,
}

impl TypeAggregate {
    /// Aggregate the results matching `assignment_type`.
    ///
    /// Without any matching result both percentages are 0, so a rule with a
    /// positive threshold cannot pass on missing evidence.
    pub fn compute(results: &[AssignmentResult], assignment_type: AssignmentType) -> Self {
        let mut assignment_count = 0usize;
        let mut passed_count = 0usize;
        let mut percent_sum = ExactSum::default();
        let mut out_of_range = Vec::new();

        for result in results
            .iter()
            .filter(|r| r.assignment_type == assignment_type)
        {
            assignment_count += 1;
            if result.passed {
                passed_count += 1;
            }
            percent_sum.add(result.achieved_percent);
            if !(0.0..=100.0).contains(&result.achieved_percent) {
                out_of_range.push(result.assignment_id.clone());
            }
        }

        let (average_achieved_percent, passed_percent) = if assignment_count == 0 {
            (0.0, 0.0)
        } else {
            let n = assignment_count as f64;
            (percent_sum.total() / n, passed_count as f64 * 100.0 / n)
        };

        Self {
            assignment_type,
            assignment_count,
            passed_count,
            average_achieved_percent,
            passed_percent,
            out_of_range,
        }
    }

    /// Whether at least one result of this type was present.
    pub fn has_data(&self) -> bool {
        self.assignment_count > 0
    }
}

/// Correctly rounded floating-point sum (Shewchuk's algorithm).
///
/// The running sum is kept as non-overlapping partials, so the mean of
/// one-decimal grades lands on the exact integer when there is one.
#[derive(Debug, Default)]
struct ExactSum {
    partials: Vec<f64>,
    non_finite: f64,
}

impl ExactSum {
    fn add(&mut self, value: f64) {
        if !value.is_finite() {
            self.non_finite += value;
            return;
        }
        let mut x = value;
        let mut kept = 0;
        for j in 0..self.partials.len() {
            let mut y = self.partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                self.partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        self.partials.truncate(kept);
        self.partials.push(x);
    }

    fn total(&self) -> f64 {
        if self.non_finite != 0.0 {
            return self.non_finite;
        }
        let mut n = self.partials.len();
        if n == 0 {
            return 0.0;
        }
        n -= 1;
        let mut hi = self.partials[n];
        let mut lo = 0.0;
        while n > 0 {
            let x = hi;
            n -= 1;
            let y = self.partials[n];
            hi = x + y;
            lo = y - (hi - x);
            if lo != 0.0 {
                break;
            }
        }
        // Half-way case: the dropped tail decides the rounding direction.
        if n > 0
            && ((lo < 0.0 && self.partials[n - 1] < 0.0)
                || (lo > 0.0 && self.partials[n - 1] > 0.0))
        {
            let y = lo * 2.0;
            let x = hi + y;
            if y == x - hi {
                hi = x;
            }
        }
        hi
    }
}

/// Aggregates computed lazily, once per assignment type.
///
/// Scoped to a single evaluation call; it borrows the student's results and
/// is dropped with them.
pub struct AggregateCache<'a> {
    results: &'a [AssignmentResult],
    by_type: HashMap<AssignmentType, TypeAggregate>,
}

impl<'a> AggregateCache<'a> {
    pub fn new(results: &'a [AssignmentResult]) -> Self {
        Self {
            results,
            by_type: HashMap::new(),
        }
    }

    /// The aggregate for `assignment_type`, computing it on first access.
    pub fn get(&mut self, assignment_type: AssignmentType) -> &TypeAggregate {
        let results = self.results;
        self.by_type
            .entry(assignment_type)
            .or_insert_with(|| TypeAggregate::compute(results, assignment_type))
    }

    /// Number of distinct types aggregated so far.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}
