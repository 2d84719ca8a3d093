//! Shared test infrastructure for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const LCOV_SCRIPT: &str = r#"#!/bin/sh
if [ "$1" != "--summary" ] || [ ! -f "$2" ]; then
    echo "lcov: ERROR: cannot read file $2!" >&2
    exit 2
fi
cat "$(dirname "$0")/summary.txt"
"#;

pub const README: &str = "# bayesnet\n\n[![Static Badge](https://img.shields.io/badge/c%2B%2B-17-blue)](https://en.cppreference.com/w/)\n[![Static Badge](https://img.shields.io/badge/Coverage-80,025-green)](html/index.html)\n\nBayesian Network Classifiers using libtorch.\n";

/// Working directory with a README, a report dir, and a fake lcov.
pub struct BadgeFixture {
    pub temp_dir: TempDir,
}

impl BadgeFixture {
    /// Fixture whose fake lcov prints a summary reporting `lines_pct`.
    pub fn with_lines_rate(lines_pct: &str) -> Self {
        Self::with_summary(&format!(
            "Summary coverage rate:\n  lines......: {lines_pct}% (190 of 200 lines)\n  functions..: 97.1% (34 of 35 functions)\n  branches...: no data found\n"
        ))
    }

    pub fn with_summary(summary: &str) -> Self {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("tools")).expect("create tools dir");
        fs::write(root.join("tools/lcov.sh"), LCOV_SCRIPT).expect("write lcov script");
        fs::write(root.join("tools/summary.txt"), summary).expect("write summary");
        fs::create_dir_all(root.join("coverage")).expect("create report dir");
        fs::write(root.join("coverage/coverage.info"), "TN:\nend_of_record\n")
            .expect("write tracefile");
        fs::write(root.join("README.md"), README).expect("write readme");
        BadgeFixture { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root().join("README.md")
    }

    pub fn readme(&self) -> String {
        fs::read_to_string(self.readme_path()).expect("read readme")
    }

    pub fn lcov_command(&self) -> String {
        let script = self.root().join("tools/lcov.sh");
        shell_words::join(["sh", script.to_str().expect("utf-8 temp path")])
    }

    /// Run the updater from the fixture root with `extra` before REPORT_DIR.
    pub fn run(&self, extra: &[&str]) -> Output {
        let bin = env!("CARGO_BIN_EXE_update-coverage");
        Command::new(bin)
            .current_dir(self.root())
            .arg("--lcov")
            .arg(self.lcov_command())
            .args(extra)
            .arg("coverage")
            .output()
            .expect("run update-coverage")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
