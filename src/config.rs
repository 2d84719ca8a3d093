//! Variant presets and effective settings for an update run.
//!
//! Values resolve as CLI flag, then config file, then variant preset.
use crate::cli::UpdateArgs;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_README: &str = "README.md";
pub const DEFAULT_TRACEFILE: &str = "coverage.info";
pub const DEFAULT_LCOV_COMMAND: &str = "lcov";
pub const DEFAULT_LINK: &str = "html/index.html";
pub const DEFAULT_THRESHOLD: f64 = 90.0;

/// Badge preset.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Threshold gate, narrow marker, badge wrapped in a report link.
    #[default]
    Gated,
    /// No gate, broad marker, bare badge image.
    Plain,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Gated => "gated",
            Variant::Plain => "plain",
        }
    }

    pub fn default_marker(&self) -> &'static str {
        match self {
            Variant::Gated => "img.shields.io/badge/Coverage",
            Variant::Plain => "badge/Coverage",
        }
    }

    pub fn default_threshold(&self) -> Option<f64> {
        match self {
            Variant::Gated => Some(DEFAULT_THRESHOLD),
            Variant::Plain => None,
        }
    }
}

/// On-disk config file; every field is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub variant: Option<Variant>,
    /// `null` disables the gate, a number enables it.
    #[serde(default, deserialize_with = "deserialize_threshold")]
    pub threshold: Option<Option<f64>>,
    #[serde(default)]
    pub marker: Option<String>,
    #[serde(default)]
    pub readme: Option<PathBuf>,
    #[serde(default)]
    pub tracefile: Option<String>,
    #[serde(default)]
    pub lcov_command: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

// Distinguishes an absent key from an explicit `null`.
fn deserialize_threshold<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse config {}", path.display()))
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub variant: Variant,
    pub report_dir: PathBuf,
    pub tracefile: String,
    pub lcov_command: String,
    pub readme: PathBuf,
    pub marker: String,
    pub threshold: Option<f64>,
    pub link: String,
    pub dry_run: bool,
}

impl Settings {
    pub fn resolve(args: UpdateArgs, file: ConfigFile) -> Result<Self> {
        let variant = args.variant.or(file.variant).unwrap_or_default();

        let threshold = if args.no_gate {
            None
        } else {
            args.threshold
                .or_else(|| file.threshold.unwrap_or_else(|| variant.default_threshold()))
        };
        if let Some(threshold) = threshold {
            if !(0.0..=100.0).contains(&threshold) {
                return Err(anyhow!("threshold {threshold} is outside 0..=100"));
            }
        }

        let marker = args
            .marker
            .or(file.marker)
            .unwrap_or_else(|| variant.default_marker().to_string());
        if marker.is_empty() {
            return Err(anyhow!("marker must not be empty"));
        }

        Ok(Settings {
            variant,
            report_dir: args.report_dir,
            tracefile: args
                .tracefile
                .or(file.tracefile)
                .unwrap_or_else(|| DEFAULT_TRACEFILE.to_string()),
            lcov_command: args
                .lcov_command
                .or(file.lcov_command)
                .unwrap_or_else(|| DEFAULT_LCOV_COMMAND.to_string()),
            readme: args
                .readme
                .or(file.readme)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_README)),
            marker,
            threshold,
            link: args
                .link
                .or(file.link)
                .unwrap_or_else(|| DEFAULT_LINK.to_string()),
            dry_run: args.dry_run,
        })
    }

    pub fn from_args(args: UpdateArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => load_config_file(path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(args, file)
    }
}
