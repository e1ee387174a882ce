//! CLI configuration (`admission.toml`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which files `batch` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Html,
    Markdown,
    All,
}

impl ReportFormat {
    pub fn includes_json(self) -> bool {
        matches!(self, ReportFormat::Json | ReportFormat::All)
    }

    pub fn includes_html(self) -> bool {
        matches!(self, ReportFormat::Html | ReportFormat::All)
    }

    pub fn includes_markdown(self) -> bool {
        matches!(self, ReportFormat::Markdown | ReportFormat::All)
    }
}

/// How `evaluate` prints a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Top-level admission CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionConfig {
    /// Output directory for batch reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Worker threads for batch evaluation.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Report format written by `batch` when `--format` is absent.
    #[serde(default = "default_format")]
    pub default_format: ReportFormat,
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./admission-results")
}
fn default_parallelism() -> usize {
    4
}
fn default_format() -> ReportFormat {
    ReportFormat::Json
}
fn default_log_level() -> String {
    "admission=info".to_string()
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            parallelism: default_parallelism(),
            default_format: default_format(),
            log_level: default_log_level(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `admission.toml` in the current directory
/// 2. `~/.config/admission/config.toml`
///
/// Environment variable overrides: `ADMISSION_OUTPUT_DIR`, `ADMISSION_PARALLELISM`.
pub fn load_config_from(path: Option<&Path>) -> Result<AdmissionConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("admission.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AdmissionConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AdmissionConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

fn apply_env_overrides(
    config: &mut AdmissionConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(dir) = lookup("ADMISSION_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Some(value) = lookup("ADMISSION_PARALLELISM") {
        config.parallelism = value
            .trim()
            .parse()
            .with_context(|| format!("invalid ADMISSION_PARALLELISM: '{value}'"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("admission"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AdmissionConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./admission-results"));
        assert_eq!(config.parallelism, 4);
        assert_eq!(config.default_format, ReportFormat::Json);
        assert_eq!(config.log_level, "admission=info");
    }

    #[test]
    fn parse_partial_config() {
        let config: AdmissionConfig = toml::from_str(
            r#"
parallelism = 8
default_format = "all"
"#,
        )
        .unwrap();
        assert_eq!(config.parallelism, 8);
        assert_eq!(config.default_format, ReportFormat::All);
        assert_eq!(config.output_dir, PathBuf::from("./admission-results"));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(toml::from_str::<AdmissionConfig>(r#"default_format = "pdf""#).is_err());
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = AdmissionConfig::default();
        apply_env_overrides(&mut config, |name| match name {
            "ADMISSION_OUTPUT_DIR" => Some("/tmp/out".into()),
            "ADMISSION_PARALLELISM" => Some(" 2 ".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.parallelism, 2);
    }

    #[test]
    fn invalid_parallelism_override_fails() {
        let mut config = AdmissionConfig::default();
        let err = apply_env_overrides(&mut config, |name| {
            (name == "ADMISSION_PARALLELISM").then(|| "many".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("ADMISSION_PARALLELISM"));
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/admission.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn format_selection() {
        assert!(ReportFormat::All.includes_html());
        assert!(ReportFormat::All.includes_markdown());
        assert!(!ReportFormat::Json.includes_html());
        assert!(ReportFormat::Markdown.includes_markdown());
    }
}
