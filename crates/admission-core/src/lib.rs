//! admission-core: admission criteria evaluation engine.
//!
//! This crate decides whether a student satisfies a course's configured
//! admission rules. Evaluation is a pure function of the student's
//! assignment results and the course's criteria; the verdict carries the
//! computed values behind every rule so callers can explain the decision.

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod rounding;
pub mod rules;
pub mod traits;
pub mod verdict;

pub use engine::{evaluate, AdmissionEngine};
pub use error::{ConfigurationError, RuleConfigError};
pub use model::{AssignmentResult, AssignmentType, CourseResults, StudentResults};
pub use rounding::RoundingPolicy;
pub use rules::{AdmissionCriteria, AdmissionRule};
pub use verdict::{AdmissionVerdict, DataQualityWarning, RuleResult};
