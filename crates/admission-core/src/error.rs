//! Configuration error types.
//!
//! Admission criteria are validated once, when they are constructed or
//! decoded. A validated `AdmissionCriteria` can always be evaluated, so these
//! are the only errors the engine produces.

use thiserror::Error;

/// Errors raised while constructing or decoding admission criteria.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The document is not valid JSON/TOML or does not have the expected shape.
    #[error("malformed admission criteria: {0}")]
    Malformed(String),

    /// A specific rule is invalid. The cause is part of the message, not a
    /// chained source, so `{:#}` prints it once.
    #[error("rule {index}: {error}")]
    Rule {
        index: usize,
        error: RuleConfigError,
    },
}

impl ConfigurationError {
    /// Index of the offending rule, if the error is attributable to one.
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            ConfigurationError::Rule { index, .. } => Some(*index),
            ConfigurationError::Malformed(_) => None,
        }
    }
}

/// Errors describing why a single admission rule is invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleConfigError {
    /// The rule's `type` tag is not a known rule kind.
    #[error("unknown rule type '{0}' (expected REQUIRED_PERCENT_OVERALL or PASSED_X_PERCENT_WITH_AT_LEAST_Y_PERCENT)")]
    UnknownRuleType(String),

    /// A rounding policy's `type` tag is not a known rounding kind.
    #[error("unknown rounding type '{tag}' in {field} (expected NONE, UP_NEAREST_INTEGER, DOWN_NEAREST_INTEGER or DECIMALS)")]
    UnknownRoundingType { field: &'static str, tag: String },

    /// The rule's `assignmentType` is not a known assignment type.
    #[error("unknown assignment type '{0}'")]
    UnknownAssignmentType(String),

    /// A required field is absent.
    #[error("missing required field '{0}'")]
    MissingField(String),

    /// A percentage threshold is outside `[0, 100]` or not a finite number.
    #[error("{field} must be between 0 and 100, got {value}")]
    PercentOutOfRange { field: &'static str, value: f64 },

    /// A `DECIMALS` rounding asks for too many (or negative) decimal places.
    #[error("{field} decimals must be between 0 and {max}, got {decimals}")]
    DecimalsOutOfRange {
        field: &'static str,
        decimals: i64,
        max: u8,
    },
}

impl RuleConfigError {
    /// Attach the rule's position in the criteria list.
    pub fn at(self, index: usize) -> ConfigurationError {
        ConfigurationError::Rule {
            index,
            error: self,
        }
    }
}
