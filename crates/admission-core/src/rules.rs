//! Admission rule variants and the course-level criteria list.
//!
//! The rule set is closed: [`AdmissionRule`] lists every kind, and each kind
//! is a struct implementing [`RuleEvaluator`]. Rules are only constructed
//! through validating constructors (or the decoder in [`crate::parser`]), so
//! every rule that exists can be evaluated.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::aggregate::TypeAggregate;
use crate::error::RuleConfigError;
use crate::model::AssignmentType;
use crate::parser::{RawCourseConfig, RawCriteria, RawRule};
use crate::rounding::{RoundingPolicy, MAX_DECIMALS};
use crate::traits::{RuleEvaluator, RuleOutcome};
use crate::verdict::{RuleDetails, RuleKind};

pub(crate) fn check_percent(field: &'static str, value: f64) -> Result<f64, RuleConfigError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(RuleConfigError::PercentOutOfRange { field, value })
    }
}

pub(crate) fn check_rounding(
    field: &'static str,
    rounding: RoundingPolicy,
) -> Result<RoundingPolicy, RuleConfigError> {
    match rounding {
        RoundingPolicy::Decimals { decimals } if decimals > MAX_DECIMALS => {
            Err(RuleConfigError::DecimalsOutOfRange {
                field,
                decimals: i64::from(decimals),
                max: MAX_DECIMALS,
            })
        }
        other => Ok(other),
    }
}

// ---------------------------------------------------------------------------
// REQUIRED_PERCENT_OVERALL
// ---------------------------------------------------------------------------

/// Passes iff the rounded average achieved percent of all assignments of one
/// type reaches the required percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredPercentOverallRule {
    assignment_type: AssignmentType,
    required_percent: f64,
    #[serde(rename = "achievedPercentRounding")]
    rounding: RoundingPolicy,
}

impl RequiredPercentOverallRule {
    pub fn new(
        assignment_type: AssignmentType,
        required_percent: f64,
        rounding: RoundingPolicy,
    ) -> Result<Self, RuleConfigError> {
        Ok(Self {
            assignment_type,
            required_percent: check_percent("requiredPercent", required_percent)?,
            rounding: check_rounding("achievedPercentRounding", rounding)?,
        })
    }

    pub fn required_percent(&self) -> f64 {
        self.required_percent
    }

    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }
}

impl RuleEvaluator for RequiredPercentOverallRule {
    fn assignment_type(&self) -> AssignmentType {
        self.assignment_type
    }

    fn evaluate(&self, aggregate: &TypeAggregate) -> RuleOutcome {
        let rounded = self.rounding.apply(aggregate.average_achieved_percent);
        let passed = rounded >= self.required_percent;
        RuleOutcome {
            passed,
            details: RuleDetails::RequiredPercentOverall {
                assignment_count: aggregate.assignment_count,
                achieved_percent: aggregate.average_achieved_percent,
                rounding: self.rounding,
                rounded_percent: rounded,
                required_percent: self.required_percent,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// PASSED_X_PERCENT_WITH_AT_LEAST_Y_PERCENT
// ---------------------------------------------------------------------------

/// Combines a quality and a completion requirement: the rounded average must
/// reach `required_percent` AND the rounded share of passed assignments must
/// reach `passed_assignments_percent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassedXPercentWithAtLeastYPercentRule {
    assignment_type: AssignmentType,
    required_percent: f64,
    achieved_percent_rounding: RoundingPolicy,
    passed_assignments_percent: f64,
    passed_assignments_rounding: RoundingPolicy,
}

impl PassedXPercentWithAtLeastYPercentRule {
    pub fn new(
        assignment_type: AssignmentType,
        required_percent: f64,
        achieved_percent_rounding: RoundingPolicy,
        passed_assignments_percent: f64,
        passed_assignments_rounding: RoundingPolicy,
    ) -> Result<Self, RuleConfigError> {
        Ok(Self {
            assignment_type,
            required_percent: check_percent("requiredPercent", required_percent)?,
            achieved_percent_rounding: check_rounding(
                "achievedPercentRounding",
                achieved_percent_rounding,
            )?,
            passed_assignments_percent: check_percent(
                "passedAssignmentsPercent",
                passed_assignments_percent,
            )?,
            passed_assignments_rounding: check_rounding(
                "passedAssignmentsRounding",
                passed_assignments_rounding,
            )?,
        })
    }

    pub fn required_percent(&self) -> f64 {
        self.required_percent
    }

    pub fn achieved_percent_rounding(&self) -> RoundingPolicy {
        self.achieved_percent_rounding
    }

    pub fn passed_assignments_percent(&self) -> f64 {
        self.passed_assignments_percent
    }

    pub fn passed_assignments_rounding(&self) -> RoundingPolicy {
        self.passed_assignments_rounding
    }
}

impl RuleEvaluator for PassedXPercentWithAtLeastYPercentRule {
    fn assignment_type(&self) -> AssignmentType {
        self.assignment_type
    }

    fn evaluate(&self, aggregate: &TypeAggregate) -> RuleOutcome {
        let achieved_rounded = self
            .achieved_percent_rounding
            .apply(aggregate.average_achieved_percent);
        let passed_rounded = self
            .passed_assignments_rounding
            .apply(aggregate.passed_percent);

        let achieved_met = achieved_rounded >= self.required_percent;
        let passed_met = passed_rounded >= self.passed_assignments_percent;

        RuleOutcome {
            passed: achieved_met && passed_met,
            details: RuleDetails::PassedXPercentWithAtLeastYPercent {
                assignment_count: aggregate.assignment_count,
                passed_count: aggregate.passed_count,
                achieved_percent: aggregate.average_achieved_percent,
                achieved_percent_rounding: self.achieved_percent_rounding,
                achieved_rounded,
                required_percent: self.required_percent,
                achieved_met,
                passed_percent: aggregate.passed_percent,
                passed_assignments_rounding: self.passed_assignments_rounding,
                passed_rounded,
                passed_assignments_percent: self.passed_assignments_percent,
                passed_met,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Rule enum and criteria
// ---------------------------------------------------------------------------

/// One configured admission rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdmissionRule {
    RequiredPercentOverall(RequiredPercentOverallRule),
    PassedXPercentWithAtLeastYPercent(PassedXPercentWithAtLeastYPercentRule),
}

impl AdmissionRule {
    pub fn kind(&self) -> RuleKind {
        match self {
            AdmissionRule::RequiredPercentOverall(_) => RuleKind::RequiredPercentOverall,
            AdmissionRule::PassedXPercentWithAtLeastYPercent(_) => {
                RuleKind::PassedXPercentWithAtLeastYPercent
            }
        }
    }

    fn evaluator(&self) -> &dyn RuleEvaluator {
        match self {
            AdmissionRule::RequiredPercentOverall(rule) => rule,
            AdmissionRule::PassedXPercentWithAtLeastYPercent(rule) => rule,
        }
    }

    pub fn assignment_type(&self) -> AssignmentType {
        self.evaluator().assignment_type()
    }

    pub fn evaluate(&self, aggregate: &TypeAggregate) -> RuleOutcome {
        self.evaluator().evaluate(aggregate)
    }
}

impl From<RequiredPercentOverallRule> for AdmissionRule {
    fn from(rule: RequiredPercentOverallRule) -> Self {
        AdmissionRule::RequiredPercentOverall(rule)
    }
}

impl From<PassedXPercentWithAtLeastYPercentRule> for AdmissionRule {
    fn from(rule: PassedXPercentWithAtLeastYPercentRule) -> Self {
        AdmissionRule::PassedXPercentWithAtLeastYPercent(rule)
    }
}

impl<'de> Deserialize<'de> for AdmissionRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawRule::deserialize(deserializer)?
            .into_rule()
            .map_err(serde::de::Error::custom)
    }
}

/// The ordered admission rules of one course.
///
/// All rules must pass for a student to be admitted; an empty list admits
/// everyone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdmissionCriteria {
    rules: Vec<AdmissionRule>,
}

impl AdmissionCriteria {
    pub fn new(rules: Vec<AdmissionRule>) -> Self {
        Self { rules }
    }

    /// Criteria without any requirement.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: impl Into<AdmissionRule>) -> Self {
        self.rules.push(rule.into());
        self
    }

    pub fn rules(&self) -> &[AdmissionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Distinct assignment types referenced by the rules.
    pub fn assignment_types(&self) -> BTreeSet<AssignmentType> {
        self.rules.iter().map(AdmissionRule::assignment_type).collect()
    }
}

impl<'de> Deserialize<'de> for AdmissionCriteria {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawCriteria::deserialize(deserializer)?
            .into_criteria()
            .map_err(serde::de::Error::custom)
    }
}

/// The admission-relevant part of a course's configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_criteria: Option<AdmissionCriteria>,
}

impl CourseConfig {
    /// The configured criteria, or empty criteria when none are configured.
    pub fn criteria(&self) -> AdmissionCriteria {
        self.admission_criteria.clone().unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for CourseConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawCourseConfig::deserialize(deserializer)?
            .into_config()
            .map_err(serde::de::Error::custom)
    }
}
