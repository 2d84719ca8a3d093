//! Marker-line replacement for the documentation file.
//!
//! Lines keep their own terminators, so the line count and order of the
//! document never change.
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Result of rewriting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub replaced: usize,
    pub changed: bool,
}

/// Replace every line containing `marker` with `badge`.
pub fn replace_marker_lines(content: &str, marker: &str, badge: &str) -> Rewrite {
    let mut out = String::with_capacity(content.len());
    let mut replaced = 0;
    for line in content.split_inclusive('\n') {
        let (body, terminator) = split_terminator(line);
        if body.contains(marker) {
            out.push_str(badge);
            out.push_str(terminator);
            replaced += 1;
        } else {
            out.push_str(line);
        }
    }
    let changed = out != content;
    Rewrite {
        content: out,
        replaced,
        changed,
    }
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Rewrite `path` in place, replacing marker lines with `badge`.
///
/// The new content is written to a temp file next to the resolved target,
/// given the original permissions, and persisted over it. Unchanged content
/// is not written.
pub fn update_file(path: &Path, marker: &str, badge: &str) -> Result<Rewrite> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let rewrite = replace_marker_lines(&content, marker, badge);
    if rewrite.replaced == 0 {
        tracing::warn!(path = %path.display(), marker, "no line contains the badge marker");
    }
    if !rewrite.changed {
        tracing::debug!(path = %path.display(), "document already up to date");
        return Ok(rewrite);
    }

    // Symlinks stay links: the staged file replaces their target.
    let target = fs::canonicalize(path).with_context(|| format!("resolve {}", path.display()))?;
    let dir = target
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", target.display()))?;
    let permissions = fs::metadata(&target)
        .with_context(|| format!("stat {}", target.display()))?
        .permissions();
    let mut staged = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    staged
        .write_all(rewrite.content.as_bytes())
        .with_context(|| format!("write staged {}", target.display()))?;
    staged
        .as_file()
        .set_permissions(permissions)
        .with_context(|| format!("copy permissions of {}", target.display()))?;
    staged
        .persist(&target)
        .with_context(|| format!("replace {}", target.display()))?;
    tracing::info!(path = %path.display(), replaced = rewrite.replaced, "document rewritten");
    Ok(rewrite)
}
