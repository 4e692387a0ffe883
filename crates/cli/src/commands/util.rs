use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use wafermap_core::grid::{self, LineIssue, LoadReport};

/// Load the record stream and build the grid, wrapping core errors with the
/// input path for the user.
pub fn load_grid(input: &str) -> Result<LoadReport> {
    grid::load_records(input).with_context(|| format!("Failed to load records from {input}"))
}

/// Report per-line loader issues on stderr, one warning per line.
///
/// These are never fatal; the grid was still built from every usable line.
pub fn report_issues(issues: &[LineIssue]) {
    for issue in issues {
        eprintln!("warning: {issue}");
    }
}

/// Create an output directory if it is not there yet. Idempotent.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output dir: {}", dir.display()))
}

/// Create the parent directory of an output file, if it has one.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output dir: {}", parent.display()))?;
        }
    }
    Ok(())
}
