//! CLI argument parsing for the badge updater.
//!
//! Every flag is optional so that a config file or the variant preset can
//! supply the value; resolution happens in `config`.
use crate::config::Variant;
use clap::Parser;
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "update-coverage",
    version,
    about = "Rewrite the README coverage badge from an lcov summary",
    after_help = "Examples:\n  update-coverage build/coverage\n  update-coverage --variant plain build/coverage\n  update-coverage --threshold 80 --readme docs/README.md build/coverage\n  update-coverage --dry-run build/coverage"
)]
pub struct UpdateArgs {
    /// Directory containing the lcov tracefile
    #[arg(value_name = "REPORT_DIR")]
    pub report_dir: PathBuf,

    /// Badge preset: gated (threshold + link) or plain (no gate, bare image)
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Minimum coverage required before the badge is updated (enables the gate)
    #[arg(long, value_name = "PCT", conflicts_with = "no_gate")]
    pub threshold: Option<f64>,

    /// Disable the threshold gate regardless of variant
    #[arg(long)]
    pub no_gate: bool,

    /// Substring identifying the badge line to replace
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,

    /// Documentation file to rewrite
    #[arg(long, value_name = "PATH")]
    pub readme: Option<PathBuf>,

    /// Tracefile name inside REPORT_DIR
    #[arg(long, value_name = "NAME")]
    pub tracefile: Option<String>,

    /// Summary command, split with shell-word rules
    #[arg(long = "lcov", value_name = "CMD")]
    pub lcov_command: Option<String>,

    /// Link target wrapped around the gated badge
    #[arg(long, value_name = "URL")]
    pub link: Option<String>,

    /// JSON config file with defaults for the flags above
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the badge line without touching the documentation file
    #[arg(long)]
    pub dry_run: bool,
}
