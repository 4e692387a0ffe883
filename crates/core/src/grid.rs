//! Sparse wafer grid and the streaming loader that populates it.
//!
//! The grid maps `(x, y)` coordinates to die records, tracks the inclusive
//! bounding box of everything inserted, and keeps running totals used for
//! yield. It is built once by a single sequential pass and read-only after
//! that; renderers and reports only ever borrow it.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::record::{self, BadBinValue, DieRecord, DieStatus, ParseError};

/// Error type for loading a record stream from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file does not exist. Fatal for the run; nothing partial is
    /// produced.
    #[error("input file not found: {0}")]
    SourceMissing(PathBuf),

    /// The input file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convenience result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Inclusive coordinate bounding box of all inserted die.
///
/// Only ever constructed for a non-empty grid, so the invariants
/// `min_x <= max_x` and `min_y <= max_y` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl GridBounds {
    fn at(x: i32, y: i32) -> Self {
        Self { min_x: x, max_x: x, min_y: y, max_y: y }
    }

    fn expand(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    /// Number of columns in the box. Computed in i64 so extreme coordinate
    /// pairs cannot overflow.
    pub fn span_x(&self) -> u64 {
        (self.max_x as i64 - self.min_x as i64 + 1) as u64
    }

    /// Number of rows in the box.
    pub fn span_y(&self) -> u64 {
        (self.max_y as i64 - self.min_y as i64 + 1) as u64
    }
}

/// Sparse mapping from die coordinates to test outcomes.
///
/// Counter semantics: `total_chips` and `pass_count` count *insert events*,
/// not live entries. Inserting twice at one coordinate overwrites the stored
/// record (last write wins) but still increments the counters twice, matching
/// the one-pass accumulation of the upstream data. `len()` is the live-entry
/// count and will lag `total_chips` whenever coordinates repeat.
#[derive(Debug, Clone, Default)]
pub struct WaferGrid {
    cells: HashMap<(i32, i32), DieRecord>,
    bounds: Option<GridBounds>,
    total_chips: u64,
    pass_count: u64,
}

impl WaferGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one record, updating bounds and counters.
    ///
    /// A record at an already-occupied coordinate replaces the stored one.
    pub fn insert(&mut self, record: DieRecord) {
        match &mut self.bounds {
            Some(bounds) => bounds.expand(record.x, record.y),
            None => self.bounds = Some(GridBounds::at(record.x, record.y)),
        }
        self.total_chips += 1;
        if record.status() == DieStatus::Pass {
            self.pass_count += 1;
        }
        self.cells.insert((record.x, record.y), record);
    }

    /// Record at a coordinate, or `None` for an untested site.
    ///
    /// Absence is a first-class outcome: it distinguishes unused die sites
    /// from tested-but-failed ones.
    pub fn lookup(&self, x: i32, y: i32) -> Option<&DieRecord> {
        self.cells.get(&(x, y))
    }

    /// Bounding box of everything inserted so far; `None` until the first
    /// insert. Renderers must treat `None` as the explicit no-data state
    /// instead of iterating.
    pub fn bounds(&self) -> Option<GridBounds> {
        self.bounds
    }

    /// Number of insert events (not distinct coordinates).
    pub fn total_chips(&self) -> u64 {
        self.total_chips
    }

    /// Number of insert events whose record classified as Pass.
    pub fn pass_count(&self) -> u64 {
        self.pass_count
    }

    /// Number of live entries (distinct populated coordinates).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when nothing was ever inserted.
    pub fn is_empty(&self) -> bool {
        self.total_chips == 0
    }

    /// Pass percentage over all insert events; exactly 0.0 for an empty grid.
    pub fn yield_rate(&self) -> f64 {
        if self.total_chips > 0 {
            self.pass_count as f64 / self.total_chips as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// A line the loader could not fully use, tagged with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineIssue {
    /// The line failed to parse and was skipped; counters unchanged.
    Skipped { line_no: usize, error: ParseError },
    /// The record was kept but its bin value fell back to 0.
    BinFallback { line_no: usize, warning: BadBinValue },
}

impl fmt::Display for LineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineIssue::Skipped { line_no, error } => {
                write!(f, "line {line_no}: {error} (line skipped)")
            }
            LineIssue::BinFallback { line_no, warning } => {
                write!(f, "line {line_no}: {warning} (record kept)")
            }
        }
    }
}

/// Outcome of one ingestion pass: the populated grid plus everything the
/// pass had to skip or degrade.
#[derive(Debug)]
pub struct LoadReport {
    pub grid: WaferGrid,
    /// Total lines seen, record or not.
    pub lines_read: usize,
    /// Per-line problems, in input order. Never fatal.
    pub issues: Vec<LineIssue>,
}

impl LoadReport {
    /// Count of issues that dropped a line outright.
    pub fn skipped_lines(&self) -> usize {
        self.issues.iter().filter(|i| matches!(i, LineIssue::Skipped { .. })).count()
    }
}

/// Build a grid from record text already in memory.
///
/// Non-record lines are ignored silently; malformed record lines are skipped
/// and reported through the returned issues, so one bad line never aborts the
/// pass.
pub fn ingest(text: &str) -> LoadReport {
    let mut grid = WaferGrid::new();
    let mut issues = Vec::new();
    let mut lines_read = 0usize;

    for (idx, line) in text.lines().enumerate() {
        lines_read += 1;
        if !record::is_part_record(line) {
            continue;
        }
        let line_no = idx + 1;
        match record::parse_record(line) {
            Ok(parsed) => {
                if let Some(warning) = parsed.bin_warning {
                    issues.push(LineIssue::BinFallback { line_no, warning });
                }
                grid.insert(parsed.record);
            }
            Err(error) => issues.push(LineIssue::Skipped { line_no, error }),
        }
    }

    LoadReport { grid, lines_read, issues }
}

/// Load a record stream from disk and build the grid.
///
/// A missing file is the one fatal case; everything per-line is recovered
/// locally and surfaced in the report.
pub fn load_records(path: impl AsRef<Path>) -> LoadResult<LoadReport> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LoadError::SourceMissing(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    Ok(ingest(&text))
}
