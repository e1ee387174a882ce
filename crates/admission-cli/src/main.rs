//! admission CLI: validate admission criteria and evaluate course admissions.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::{OutputFormat, ReportFormat};

#[derive(Parser)]
#[command(
    name = "admission",
    version,
    about = "Course admission criteria evaluation"
)]
struct Cli {
    /// Config file path (default: ./admission.toml, then ~/.config/admission/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and lint admission criteria files
    Validate {
        /// Path to a .json/.toml criteria file or a directory of them
        #[arg(long)]
        criteria: PathBuf,
    },

    /// Evaluate one student's results against admission criteria
    Evaluate {
        /// Admission criteria file (.json or .toml)
        #[arg(long)]
        criteria: PathBuf,

        /// Student results JSON
        #[arg(long)]
        results: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit code 1 if the student is not admitted
        #[arg(long)]
        fail_on_denied: bool,
    },

    /// Evaluate every student of a course and write reports
    Batch {
        /// Admission criteria file (.json or .toml)
        #[arg(long)]
        criteria: PathBuf,

        /// Course results JSON
        #[arg(long)]
        results: PathBuf,

        /// Worker threads (default from config)
        #[arg(long)]
        parallelism: Option<usize>,

        /// Output directory (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format (default from config)
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
    },

    /// Compare two course admission reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Exit code 1 if a previously admitted student is now denied
        #[arg(long)]
        fail_on_new_denials: bool,
    },

    /// Create starter config and example criteria
    Init,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_config_from(cli.config.as_deref())?;
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Validate { criteria } => commands::validate::execute(criteria),
        Commands::Evaluate {
            criteria,
            results,
            format,
            fail_on_denied,
        } => commands::evaluate::execute(criteria, results, format, fail_on_denied),
        Commands::Batch {
            criteria,
            results,
            parallelism,
            output,
            format,
        } => commands::batch::execute(
            criteria,
            results,
            parallelism.unwrap_or(config.parallelism),
            output.unwrap_or(config.output_dir),
            format.unwrap_or(config.default_format),
        ),
        Commands::Compare {
            baseline,
            current,
            format,
            fail_on_new_denials,
        } => commands::compare::execute(baseline, current, format, fail_on_new_denials),
        Commands::Init => commands::init::execute(),
    }
}

/// Log to stderr, filtered by `RUST_LOG` or else the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
