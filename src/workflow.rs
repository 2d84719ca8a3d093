use crate::badge::render_badge;
use crate::config::Settings;
use crate::readme;
use crate::summary::{self, Coverage};
use anyhow::Result;

/// How an update run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Updated { coverage: Coverage, replaced: usize },
    BelowThreshold { coverage: Coverage, threshold: f64 },
    DryRun { coverage: Coverage, badge: String },
}

pub fn run_update(settings: &Settings) -> Result<Outcome> {
    println!("Updating coverage...");
    let output = summary::run_summary(
        &settings.lcov_command,
        &settings.report_dir,
        &settings.tracefile,
    )?;
    let coverage = summary::extract_percentage(&output)?;
    apply_coverage(settings, coverage)
}

/// Apply the gate and write the badge for an already extracted percentage.
pub fn apply_coverage(settings: &Settings, coverage: Coverage) -> Result<Outcome> {
    tracing::debug!(
        variant = settings.variant.as_str(),
        value = coverage.value,
        threshold = ?settings.threshold,
        "coverage extracted"
    );
    if let Some(threshold) = settings.threshold {
        if coverage.is_below(threshold) {
            println!("⛔Coverage is less than {threshold}%. I won't update the badge.");
            return Ok(Outcome::BelowThreshold {
                coverage,
                threshold,
            });
        }
    }

    let badge = render_badge(settings.variant, &coverage, &settings.link);
    if settings.dry_run {
        println!("{badge}");
        return Ok(Outcome::DryRun { coverage, badge });
    }

    let rewrite = readme::update_file(&settings.readme, &settings.marker, &badge)?;
    println!("✅Coverage updated with value: {}", coverage.comma_text());
    Ok(Outcome::Updated {
        coverage,
        replaced: rewrite.replaced,
    })
}
