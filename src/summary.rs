//! lcov summary invocation and percentage extraction.
//!
//! The summary command is run directly rather than through a shell pipeline;
//! the `head -2 | tail -1 | cut -d' ' -f4` selection is reproduced in
//! `extract_percentage`.
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;
use std::time::Instant;

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)%").expect("percent pattern is valid"));

/// Coverage percentage plus the exact text it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    pub value: f64,
    pub text: String,
}

impl Coverage {
    pub fn parse(raw: &str) -> Result<Self> {
        let text = raw.trim();
        let value: f64 = text
            .parse()
            .with_context(|| format!("parse coverage percentage {text:?}"))?;
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(anyhow!("coverage percentage {text} is outside 0..=100"));
        }
        Ok(Coverage {
            value,
            text: text.to_string(),
        })
    }

    /// Percentage text with a decimal comma, as shown on the badge.
    pub fn comma_text(&self) -> String {
        self.text.replace('.', ",")
    }

    pub fn is_below(&self, threshold: f64) -> bool {
        self.value < threshold
    }
}

/// Build `<lcov_command> --summary <report_dir>/<tracefile>`.
pub fn summary_command(lcov_command: &str, report_dir: &Path, tracefile: &str) -> Result<Command> {
    let words = shell_words::split(lcov_command)
        .with_context(|| format!("parse summary command: {lcov_command}"))?;
    let (program, extra) = words
        .split_first()
        .ok_or_else(|| anyhow!("summary command is empty"))?;
    let program =
        which::which(program).with_context(|| format!("locate summary command {program}"))?;
    let mut command = Command::new(program);
    command
        .args(extra)
        .arg("--summary")
        .arg(report_dir.join(tracefile));
    Ok(command)
}

/// Run the summary command and return its stdout.
pub fn run_summary(lcov_command: &str, report_dir: &Path, tracefile: &str) -> Result<String> {
    let mut command = summary_command(lcov_command, report_dir, tracefile)?;
    tracing::debug!(?command, "running coverage summary");
    let start = Instant::now();
    let output = command
        .output()
        .with_context(|| format!("run {lcov_command} --summary"))?;
    let elapsed_ms = start.elapsed().as_millis();

    tracing::info!(
        elapsed_ms,
        stdout_bytes = output.stdout.len(),
        status = %output.status,
        "coverage summary complete"
    );

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr_line = stderr.trim().lines().next().unwrap_or_default();
        let detail = if stderr_line.is_empty() {
            format!("status {}", output.status)
        } else {
            stderr_line.to_string()
        };
        return Err(anyhow!("{lcov_command} --summary failed: {detail}"));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Pick the percentage from summary output by position.
///
/// Takes the last of the first two lines and its fourth single-space field
/// with one trailing `%` removed. When that field is not a number the first
/// `<number>%` token on the same line is used instead.
pub fn extract_percentage(output: &str) -> Result<Coverage> {
    let line = output
        .lines()
        .take(2)
        .last()
        .ok_or_else(|| anyhow!("coverage summary output is empty"))?;

    let field = line.split(' ').nth(3).unwrap_or_default().trim();
    let field = field.strip_suffix('%').unwrap_or(field);
    if let Ok(coverage) = Coverage::parse(field) {
        return Ok(coverage);
    }

    let captured = PERCENT_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| anyhow!("no coverage percentage in summary line {line:?}"))?;
    tracing::debug!(field, line, "positional field not numeric; using first percent token");
    Coverage::parse(captured.as_str())
}
