//! Admission criteria decoder and validator.
//!
//! Decodes persisted course configuration (JSON, or TOML with the same field
//! names) into validated [`AdmissionCriteria`], loads result files for the
//! CLI, and lints criteria for legal but suspicious configurations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::{ConfigurationError, RuleConfigError};
use crate::model::{AssignmentType, CourseResults, StudentResults};
use crate::rounding::{RoundingPolicy, MAX_DECIMALS};
use crate::rules::{
    AdmissionCriteria, AdmissionRule, CourseConfig, PassedXPercentWithAtLeastYPercentRule,
    RequiredPercentOverallRule,
};
use crate::verdict::RuleKind;

// ---------------------------------------------------------------------------
// Raw (unvalidated) document shapes
// ---------------------------------------------------------------------------

/// Intermediate structure for an admission criteria document.
///
/// Unknown keys are rejected: a misspelled `rules` key must not decode to
/// empty criteria, which would admit everyone.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawCriteria {
    #[serde(default, alias = "criteria")]
    rules: Vec<RawRule>,
}

/// Intermediate structure for a single rule. Every field is optional so that
/// a missing field is reported by name instead of as a generic shape error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct RawRule {
    #[serde(rename = "type")]
    kind: Option<String>,
    assignment_type: Option<String>,
    required_percent: Option<f64>,
    #[serde(alias = "rounding")]
    achieved_percent_rounding: Option<RawRounding>,
    passed_assignments_percent: Option<f64>,
    passed_assignments_rounding: Option<RawRounding>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawRounding {
    #[serde(rename = "type")]
    kind: Option<String>,
    decimals: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCourseId {
    Text(String),
    Number(i64),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCourseConfig {
    #[serde(default)]
    id: Option<RawCourseId>,
    #[serde(default)]
    admission_criteria: Option<RawCriteria>,
}

impl RawCriteria {
    pub(crate) fn into_criteria(self) -> Result<AdmissionCriteria, ConfigurationError> {
        let rules = self
            .rules
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.into_rule().map_err(|e| e.at(index)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AdmissionCriteria::new(rules))
    }
}

impl RawRule {
    pub(crate) fn into_rule(self) -> Result<AdmissionRule, RuleConfigError> {
        let tag = self
            .kind
            .ok_or_else(|| RuleConfigError::MissingField("type".into()))?;
        let kind = match tag.as_str() {
            "REQUIRED_PERCENT_OVERALL" => RuleKind::RequiredPercentOverall,
            "PASSED_X_PERCENT_WITH_AT_LEAST_Y_PERCENT" => {
                RuleKind::PassedXPercentWithAtLeastYPercent
            }
            _ => return Err(RuleConfigError::UnknownRuleType(tag)),
        };

        let type_tag = self
            .assignment_type
            .ok_or_else(|| RuleConfigError::MissingField("assignmentType".into()))?;
        let assignment_type: AssignmentType = type_tag
            .parse()
            .map_err(|_| RuleConfigError::UnknownAssignmentType(type_tag.clone()))?;

        let required_percent = self
            .required_percent
            .ok_or_else(|| RuleConfigError::MissingField("requiredPercent".into()))?;
        let achieved_rounding =
            decode_rounding("achievedPercentRounding", self.achieved_percent_rounding)?;

        match kind {
            RuleKind::RequiredPercentOverall => Ok(RequiredPercentOverallRule::new(
                assignment_type,
                required_percent,
                achieved_rounding,
            )?
            .into()),
            RuleKind::PassedXPercentWithAtLeastYPercent => {
                let passed_percent = self.passed_assignments_percent.ok_or_else(|| {
                    RuleConfigError::MissingField("passedAssignmentsPercent".into())
                })?;
                let passed_rounding =
                    decode_rounding("passedAssignmentsRounding", self.passed_assignments_rounding)?;
                Ok(PassedXPercentWithAtLeastYPercentRule::new(
                    assignment_type,
                    required_percent,
                    achieved_rounding,
                    passed_percent,
                    passed_rounding,
                )?
                .into())
            }
        }
    }
}

impl RawCourseConfig {
    pub(crate) fn into_config(self) -> Result<CourseConfig, ConfigurationError> {
        let id = self.id.map(|id| match id {
            RawCourseId::Text(text) => text,
            RawCourseId::Number(n) => n.to_string(),
        });
        let admission_criteria = self
            .admission_criteria
            .map(RawCriteria::into_criteria)
            .transpose()?;
        Ok(CourseConfig {
            id,
            admission_criteria,
        })
    }
}

fn decode_rounding(
    field: &'static str,
    raw: Option<RawRounding>,
) -> Result<RoundingPolicy, RuleConfigError> {
    let raw = raw.ok_or_else(|| RuleConfigError::MissingField(field.into()))?;
    let tag = raw
        .kind
        .ok_or_else(|| RuleConfigError::MissingField(format!("{field}.type")))?;
    match tag.as_str() {
        "NONE" => Ok(RoundingPolicy::None),
        "UP_NEAREST_INTEGER" => Ok(RoundingPolicy::UpNearestInteger),
        "DOWN_NEAREST_INTEGER" => Ok(RoundingPolicy::DownNearestInteger),
        "DECIMALS" => {
            let requested = raw
                .decimals
                .ok_or_else(|| RuleConfigError::MissingField(format!("{field}.decimals")))?;
            let decimals = u8::try_from(requested)
                .ok()
                .filter(|d| *d <= MAX_DECIMALS)
                .ok_or(RuleConfigError::DecimalsOutOfRange {
                    field,
                    decimals: requested,
                    max: MAX_DECIMALS,
                })?;
            Ok(RoundingPolicy::Decimals { decimals })
        }
        _ => Err(RuleConfigError::UnknownRoundingType { field, tag }),
    }
}

// ---------------------------------------------------------------------------
// String decoding
// ---------------------------------------------------------------------------

/// Supported configuration document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension; anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        if path.extension().is_some_and(|ext| ext == "toml") {
            ConfigFormat::Toml
        } else {
            ConfigFormat::Json
        }
    }
}

/// Decode admission criteria from a string in the given format.
pub fn parse_criteria_str(
    content: &str,
    format: ConfigFormat,
) -> Result<AdmissionCriteria, ConfigurationError> {
    let raw: RawCriteria = match format {
        ConfigFormat::Json => serde_json::from_str(content)
            .map_err(|e| ConfigurationError::Malformed(e.to_string()))?,
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigurationError::Malformed(e.to_string()))?
        }
    };
    raw.into_criteria()
}

/// Decode admission criteria from JSON (`{"rules": [...]}`).
pub fn parse_criteria_json(content: &str) -> Result<AdmissionCriteria, ConfigurationError> {
    parse_criteria_str(content, ConfigFormat::Json)
}

/// Decode admission criteria from TOML (`[[rules]]` tables).
pub fn parse_criteria_toml(content: &str) -> Result<AdmissionCriteria, ConfigurationError> {
    parse_criteria_str(content, ConfigFormat::Toml)
}

/// Decode a course configuration from JSON (`{"id": .., "admissionCriteria": {..}}`).
pub fn parse_course_config_json(content: &str) -> Result<CourseConfig, ConfigurationError> {
    let raw: RawCourseConfig = serde_json::from_str(content)
        .map_err(|e| ConfigurationError::Malformed(e.to_string()))?;
    raw.into_config()
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

/// Load admission criteria from a `.json` or `.toml` file.
pub fn load_criteria(path: &Path) -> Result<AdmissionCriteria> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read criteria file: {}", path.display()))?;
    let criteria = parse_criteria_str(&content, ConfigFormat::from_path(path))
        .with_context(|| format!("invalid admission criteria in {}", path.display()))?;
    Ok(criteria)
}

/// Load one student's results from a JSON file.
pub fn load_student_results(path: &Path) -> Result<StudentResults> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read results file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse student results: {}", path.display()))
}

/// Load the results of a whole course from a JSON file.
pub fn load_course_results(path: &Path) -> Result<CourseResults> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read results file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse course results: {}", path.display()))
}

/// Recursively list all `.json` and `.toml` files under a directory, sorted.
pub fn criteria_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(criteria_files_in(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "json" || ext == "toml")
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// ---------------------------------------------------------------------------
// Lints
// ---------------------------------------------------------------------------

/// A warning about legal but probably unintended criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The rule index (if applicable).
    pub rule_index: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn rule(index: usize, message: impl Into<String>) -> Self {
        Self {
            rule_index: Some(index),
            message: message.into(),
        }
    }
}

/// Lint validated criteria for common configuration mistakes.
pub fn validate_criteria(criteria: &AdmissionCriteria) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let rules = criteria.rules();

    // Duplicate rules
    for (i, rule) in rules.iter().enumerate() {
        if let Some(first) = rules[..i].iter().position(|earlier| earlier == rule) {
            warnings.push(ValidationWarning::rule(
                i,
                format!("duplicates rule {first}"),
            ));
        }
    }

    // Zero thresholds
    for (i, rule) in rules.iter().enumerate() {
        match rule {
            AdmissionRule::RequiredPercentOverall(r) if r.required_percent() == 0.0 => {
                warnings.push(ValidationWarning::rule(
                    i,
                    "requiredPercent is 0; rule passes for any non-negative average",
                ));
            }
            AdmissionRule::PassedXPercentWithAtLeastYPercent(r) => {
                if r.required_percent() == 0.0 {
                    warnings.push(ValidationWarning::rule(
                        i,
                        "requiredPercent is 0; the average condition always holds",
                    ));
                }
                if r.passed_assignments_percent() == 0.0 {
                    warnings.push(ValidationWarning::rule(
                        i,
                        "passedAssignmentsPercent is 0; the passed-assignments condition always holds",
                    ));
                }
            }
            AdmissionRule::RequiredPercentOverall(_) => {}
        }
    }

    // Several overall rules for the same type: only the strictest one matters.
    let mut overall_by_type: HashMap<AssignmentType, Vec<usize>> = HashMap::new();
    for (i, rule) in rules.iter().enumerate() {
        if let AdmissionRule::RequiredPercentOverall(_) = rule {
            overall_by_type
                .entry(rule.assignment_type())
                .or_default()
                .push(i);
        }
    }
    let mut repeated: Vec<_> = overall_by_type
        .into_iter()
        .filter(|(_, indices)| indices.len() > 1)
        .collect();
    repeated.sort_by_key(|(ty, _)| *ty);
    for (ty, indices) in repeated {
        warnings.push(ValidationWarning {
            rule_index: None,
            message: format!(
                "{} REQUIRED_PERCENT_OVERALL rules for {ty} (rules {})",
                indices.len(),
                indices
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) const SAMPLE_JSON: &str = r#"{
  "rules": [
    {
      "type": "REQUIRED_PERCENT_OVERALL",
      "assignmentType": "HOMEWORK",
      "requiredPercent": 50,
      "achievedPercentRounding": { "type": "UP_NEAREST_INTEGER" }
    },
    {
      "type": "REQUIRED_PERCENT_OVERALL",
      "assignmentType": "TESTAT",
      "requiredPercent": 50,
      "achievedPercentRounding": { "type": "DECIMALS", "decimals": 0 }
    },
    {
      "type": "PASSED_X_PERCENT_WITH_AT_LEAST_Y_PERCENT",
      "assignmentType": "HOMEWORK",
      "requiredPercent": 50,
      "achievedPercentRounding": { "type": "NONE" },
      "passedAssignmentsPercent": 70,
      "passedAssignmentsRounding": { "type": "DOWN_NEAREST_INTEGER" }
    }
  ]
}"#;

    fn rule_error(json: &str) -> RuleConfigError {
        match parse_criteria_json(json) {
            Err(ConfigurationError::Rule { error, .. }) => error,
            other => panic!("expected rule error, got {other:?}"),
        }
    }

    #[test]
    fn parse_valid_json() {
        let criteria = parse_criteria_json(SAMPLE_JSON).unwrap();
        assert_eq!(criteria.len(), 3);
        assert_eq!(criteria.rules()[0].kind(), RuleKind::RequiredPercentOverall);
        assert_eq!(criteria.rules()[1].assignment_type(), AssignmentType::Testat);
        match &criteria.rules()[2] {
            AdmissionRule::PassedXPercentWithAtLeastYPercent(rule) => {
                assert_eq!(rule.passed_assignments_percent(), 70.0);
                assert_eq!(
                    rule.passed_assignments_rounding(),
                    RoundingPolicy::DownNearestInteger
                );
            }
            other => panic!("unexpected rule: {other:?}"),
        }
    }

    #[test]
    fn serialized_criteria_decode_back() {
        let criteria = parse_criteria_json(SAMPLE_JSON).unwrap();
        let json = serde_json::to_string(&criteria).unwrap();
        assert_eq!(parse_criteria_json(&json).unwrap(), criteria);
    }

    #[test]
    fn empty_document_means_no_rules() {
        assert!(parse_criteria_json("{}").unwrap().is_empty());
        assert!(parse_criteria_json(r#"{"rules": []}"#).unwrap().is_empty());
    }

    #[test]
    fn misspelled_rules_key_is_rejected() {
        let rule = r#"{"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
            "requiredPercent": 90, "achievedPercentRounding": {"type": "NONE"}}"#;
        for key in ["rule", "rulez"] {
            let json = format!(r#"{{"{key}": [{rule}]}}"#);
            let err = parse_criteria_json(&json).unwrap_err();
            assert!(matches!(err, ConfigurationError::Malformed(_)), "{key}: {err}");
            assert!(err.to_string().contains(key));
        }

        let toml = "[[rulez]]\ntype = \"REQUIRED_PERCENT_OVERALL\"\n";
        assert!(matches!(
            parse_criteria_toml(toml),
            Err(ConfigurationError::Malformed(_))
        ));
    }

    #[test]
    fn misspelled_rule_field_is_rejected() {
        let err = parse_criteria_json(
            r#"{"rules": [{"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
                "requiredPercent": 50, "achievedPercentRounding": {"type": "NONE"},
                "requiredPercentage": 90}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("requiredPercentage"));

        let err = parse_criteria_json(
            r#"{"rules": [{"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
                "requiredPercent": 50, "achievedPercentRounding": {"type": "DECIMALS", "decimal": 1}}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("decimal"));
    }

    #[test]
    fn criteria_alias_is_accepted() {
        let json = r#"{"criteria": [{
            "type": "REQUIRED_PERCENT_OVERALL",
            "assignmentType": "SEMINAR",
            "requiredPercent": 40,
            "rounding": { "type": "NONE" }
        }]}"#;
        let criteria = parse_criteria_json(json).unwrap();
        assert_eq!(criteria.rules()[0].assignment_type(), AssignmentType::Seminar);
    }

    #[test]
    fn unknown_rule_type_is_rejected() {
        let err = rule_error(
            r#"{"rules": [{"type": "ANY_OF", "assignmentType": "HOMEWORK", "requiredPercent": 50,
                "achievedPercentRounding": {"type": "NONE"}}]}"#,
        );
        assert_eq!(err, RuleConfigError::UnknownRuleType("ANY_OF".into()));
    }

    #[test]
    fn unknown_rounding_type_never_defaults_to_none() {
        let err = rule_error(
            r#"{"rules": [{"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
                "requiredPercent": 50, "achievedPercentRounding": {"type": "HALF_EVEN"}}]}"#,
        );
        assert_eq!(
            err,
            RuleConfigError::UnknownRoundingType {
                field: "achievedPercentRounding",
                tag: "HALF_EVEN".into()
            }
        );
    }

    #[test]
    fn unknown_assignment_type_is_rejected() {
        let err = rule_error(
            r#"{"rules": [{"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "QUIZ",
                "requiredPercent": 50, "achievedPercentRounding": {"type": "NONE"}}]}"#,
        );
        assert_eq!(err, RuleConfigError::UnknownAssignmentType("QUIZ".into()));
    }

    #[test]
    fn missing_fields_are_named() {
        let err = rule_error(
            r#"{"rules": [{"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
                "achievedPercentRounding": {"type": "NONE"}}]}"#,
        );
        assert_eq!(err, RuleConfigError::MissingField("requiredPercent".into()));

        let err = rule_error(
            r#"{"rules": [{"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
                "requiredPercent": 50}]}"#,
        );
        assert_eq!(
            err,
            RuleConfigError::MissingField("achievedPercentRounding".into())
        );

        let err = rule_error(
            r#"{"rules": [{"type": "PASSED_X_PERCENT_WITH_AT_LEAST_Y_PERCENT",
                "assignmentType": "HOMEWORK", "requiredPercent": 50,
                "achievedPercentRounding": {"type": "NONE"},
                "passedAssignmentsRounding": {"type": "NONE"}}]}"#,
        );
        assert_eq!(
            err,
            RuleConfigError::MissingField("passedAssignmentsPercent".into())
        );

        let err = rule_error(
            r#"{"rules": [{"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
                "requiredPercent": 50, "achievedPercentRounding": {"type": "DECIMALS"}}]}"#,
        );
        assert_eq!(
            err,
            RuleConfigError::MissingField("achievedPercentRounding.decimals".into())
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = rule_error(
            r#"{"rules": [{"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
                "requiredPercent": 101, "achievedPercentRounding": {"type": "NONE"}}]}"#,
        );
        assert!(matches!(err, RuleConfigError::PercentOutOfRange { value, .. } if value == 101.0));

        let err = rule_error(
            r#"{"rules": [{"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
                "requiredPercent": 50, "achievedPercentRounding": {"type": "DECIMALS", "decimals": -1}}]}"#,
        );
        assert!(matches!(
            err,
            RuleConfigError::DecimalsOutOfRange { decimals: -1, .. }
        ));
    }

    #[test]
    fn error_reports_rule_index() {
        let json = r#"{"rules": [
            {"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
             "requiredPercent": 50, "achievedPercentRounding": {"type": "NONE"}},
            {"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
             "requiredPercent": 50, "achievedPercentRounding": {"type": "SOMETIMES"}}
        ]}"#;
        let err = parse_criteria_json(json).unwrap_err();
        assert_eq!(err.rule_index(), Some(1));
        assert!(err.to_string().starts_with("rule 1: unknown rounding type 'SOMETIMES'"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = parse_criteria_json("this is not { json").unwrap_err();
        assert!(matches!(err, ConfigurationError::Malformed(_)));
    }

    #[test]
    fn parse_toml() {
        let toml = r#"
[[rules]]
type = "REQUIRED_PERCENT_OVERALL"
assignmentType = "PROJECT"
requiredPercent = 60
achievedPercentRounding = { type = "DECIMALS", decimals = 1 }
"#;
        let criteria = parse_criteria_toml(toml).unwrap();
        assert_eq!(criteria.len(), 1);
        match &criteria.rules()[0] {
            AdmissionRule::RequiredPercentOverall(rule) => {
                assert_eq!(rule.required_percent(), 60.0);
                assert_eq!(rule.rounding(), RoundingPolicy::Decimals { decimals: 1 });
            }
            other => panic!("unexpected rule: {other:?}"),
        }
    }

    #[test]
    fn course_config_without_criteria_admits_everyone() {
        let config = parse_course_config_json(r#"{"id": 7}"#).unwrap();
        assert_eq!(config.id.as_deref(), Some("7"));
        assert!(config.criteria().is_empty());
    }

    #[test]
    fn course_config_with_criteria() {
        let json = format!(r#"{{"id": "java-2024", "admissionCriteria": {SAMPLE_JSON}}}"#);
        let config = parse_course_config_json(&json).unwrap();
        assert_eq!(config.criteria().len(), 3);

        let via_serde: CourseConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(via_serde, config);
    }

    #[test]
    fn lint_flags_duplicates_and_zero_thresholds() {
        let json = r#"{"rules": [
            {"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
             "requiredPercent": 50, "achievedPercentRounding": {"type": "NONE"}},
            {"type": "REQUIRED_PERCENT_OVERALL", "assignmentType": "HOMEWORK",
             "requiredPercent": 50, "achievedPercentRounding": {"type": "NONE"}},
            {"type": "PASSED_X_PERCENT_WITH_AT_LEAST_Y_PERCENT", "assignmentType": "TESTAT",
             "requiredPercent": 0, "achievedPercentRounding": {"type": "NONE"},
             "passedAssignmentsPercent": 80, "passedAssignmentsRounding": {"type": "NONE"}}
        ]}"#;
        let criteria = parse_criteria_json(json).unwrap();
        let warnings = validate_criteria(&criteria);
        assert!(warnings
            .iter()
            .any(|w| w.rule_index == Some(1) && w.message.contains("duplicates rule 0")));
        assert!(warnings
            .iter()
            .any(|w| w.rule_index == Some(2) && w.message.contains("requiredPercent is 0")));
        assert!(warnings
            .iter()
            .any(|w| w.rule_index.is_none() && w.message.contains("2 REQUIRED_PERCENT_OVERALL rules for HOMEWORK")));
    }

    #[test]
    fn lint_is_quiet_for_sample() {
        let criteria = parse_criteria_json(SAMPLE_JSON).unwrap();
        assert!(validate_criteria(&criteria).is_empty());
    }

    #[test]
    fn load_files_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), SAMPLE_JSON).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("b.toml"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = criteria_files_in(dir.path()).unwrap();
        assert_eq!(files.len(), 2);

        let criteria = load_criteria(&files[0]).unwrap();
        assert_eq!(criteria.len(), 3);
        assert!(load_criteria(&files[1]).unwrap().is_empty());
    }

    #[test]
    fn load_missing_file_fails_with_context() {
        let err = load_criteria(Path::new("does-not-exist.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read criteria file"));
    }
}
