use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

mod badge;
mod cli;
mod config;
mod readme;
mod summary;
mod workflow;

use cli::UpdateArgs;
use config::Settings;
use workflow::{run_update, Outcome};

const LOG_ENV: &str = "COVERAGE_BADGE_LOG";

fn main() -> Result<ExitCode> {
    init_logging();
    let args = UpdateArgs::parse();
    let settings = Settings::from_args(args)?;

    match run_update(&settings)? {
        Outcome::BelowThreshold {
            coverage,
            threshold,
        } => {
            tracing::info!(value = coverage.value, threshold, "badge left unchanged");
            Ok(ExitCode::from(1))
        }
        Outcome::Updated { coverage, replaced } => {
            tracing::info!(value = coverage.value, replaced, "badge updated");
            Ok(ExitCode::SUCCESS)
        }
        Outcome::DryRun { coverage, badge } => {
            tracing::debug!(value = coverage.value, badge, "dry run");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
