//! Die record parsing.
//!
//! One input line describes one tested die. Lines are pipe-delimited part-result
//! records; every other line in the stream (headers, other record types) is out
//! of scope and skipped. Field extraction is positional, matching the upstream
//! column contract, not name-based.

use thiserror::Error;

/// Prefix identifying a part-result record line.
pub const RECORD_PREFIX: &str = "PRR|";

/// Bin code that classifies a die as passing.
pub const PASS_BIN: i32 = 1;

/// Minimum token count for a usable record (the bin-source field sits at
/// index 11, so anything shorter cannot be extracted).
pub const MIN_FIELDS: usize = 12;

const X_FIELD: usize = 7;
const Y_FIELD: usize = 8;
const PART_ID_FIELD: usize = 10;
const BIN_SOURCE_FIELD: usize = 11;

/// Error type for record-line parsing.
///
/// Both variants are per-line: the offending line is skipped and the stream
/// continues. Nothing here is fatal for a load.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line did not have enough fields to reach the bin-source column.
    #[error("record has {found} fields, expected at least {min}")]
    Truncated { found: usize, min: usize },

    /// A coordinate token was not an integer. The record is dropped because a
    /// die without a grid position cannot be placed.
    #[error("{axis} coordinate '{token}' is not an integer")]
    BadCoordinate { axis: char, token: String },
}

/// Convenience result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Recoverable defect: the bin-source token was not numeric.
///
/// Unlike a bad coordinate this does not drop the record; the bin value falls
/// back to 0 (Fail) and the record is kept.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("bin token '{token}' is not numeric, bin value defaulted to 0")]
pub struct BadBinValue {
    pub token: String,
}

/// Pass/fail classification of a die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DieStatus {
    Pass,
    Fail,
}

impl DieStatus {
    /// Single-character form used by the textual wafer map.
    pub fn symbol(self) -> char {
        match self {
            DieStatus::Pass => 'P',
            DieStatus::Fail => 'F',
        }
    }
}

/// One physical die's test outcome.
///
/// `x`/`y` may be negative; the wafer center is typically near the origin.
/// Pass/fail status is derived from `bin_value` on demand (see
/// [`DieRecord::status`]) and never stored separately.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DieRecord {
    /// Horizontal grid coordinate.
    pub x: i32,
    /// Vertical grid coordinate.
    pub y: i32,
    /// Die/part label. Free-form text, in practice numeric-looking.
    pub part_id: String,
    /// Integer classification code (truncated from the raw floating-point token).
    pub bin_value: i32,
}

impl DieRecord {
    pub fn new(x: i32, y: i32, part_id: impl Into<String>, bin_value: i32) -> Self {
        Self { x, y, part_id: part_id.into(), bin_value }
    }

    /// Pass iff the bin code equals [`PASS_BIN`].
    pub fn status(&self) -> DieStatus {
        if self.bin_value == PASS_BIN {
            DieStatus::Pass
        } else {
            DieStatus::Fail
        }
    }
}

/// A successfully parsed record line, plus any recoverable warning raised
/// while extracting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub record: DieRecord,
    /// Present when the bin-source token failed numeric parsing and the bin
    /// value fell back to 0.
    pub bin_warning: Option<BadBinValue>,
}

/// Whether a line is a part-result record at all.
///
/// Non-record lines are not errors; the stream interleaves other record types
/// and headers that the grid builder simply ignores.
pub fn is_part_record(line: &str) -> bool {
    line.trim_start().starts_with(RECORD_PREFIX)
}

/// Parse one part-result record line.
///
/// Callers are expected to have checked [`is_part_record`] first; a non-record
/// line fed here reports as truncated since it will not split into enough
/// fields.
///
/// Coordinate failures drop the whole record; a bad bin-source token only
/// degrades it (bin 0, warning attached). That asymmetry is deliberate: a die
/// without a position cannot be placed on the map, but a die with an unreadable
/// classification still occupies a real site.
pub fn parse_record(line: &str) -> ParseResult<ParsedRecord> {
    let fields: Vec<&str> = line.trim().split('|').collect();
    if fields.len() < MIN_FIELDS {
        return Err(ParseError::Truncated { found: fields.len(), min: MIN_FIELDS });
    }

    let x = parse_coordinate(fields[X_FIELD], 'X')?;
    let y = parse_coordinate(fields[Y_FIELD], 'Y')?;
    let part_id = fields[PART_ID_FIELD].trim().to_string();

    let bin_token = fields[BIN_SOURCE_FIELD].trim();
    let (bin_value, bin_warning) = match bin_token.parse::<f64>() {
        // Truncation toward zero, matching the upstream integer coercion.
        Ok(raw) => (raw as i32, None),
        Err(_) => (0, Some(BadBinValue { token: bin_token.to_string() })),
    };

    Ok(ParsedRecord { record: DieRecord { x, y, part_id, bin_value }, bin_warning })
}

fn parse_coordinate(token: &str, axis: char) -> ParseResult<i32> {
    token
        .trim()
        .parse::<i32>()
        .map_err(|_| ParseError::BadCoordinate { axis, token: token.trim().to_string() })
}
