//! Instrumentation dump to CSV conversion.
//!
//! The dump is the textual export of the tester log: record headers of the
//! form `Record 17, type=Prr, 22 entries:` followed by one `KEY = VALUE
//! (TYPE)` line per field. Only part-result (`Prr`) blocks matter here; each
//! completed block becomes one CSV row in the column order the downstream
//! grid loader expects.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

/// Header row of the converted CSV.
pub const CSV_HEADER: &str = "X_COORD,Y_COORD,PART_ID,HARD_BIN,SOFT_BIN,PART_TXT";

const EXTRACTED_FIELDS: [&str; 6] =
    ["X_COORD", "Y_COORD", "PART_ID", "HARD_BIN", "SOFT_BIN", "PART_TXT"];

/// Error type for dump conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The dump file does not exist.
    #[error("input file not found: {0}")]
    SourceMissing(PathBuf),

    /// The dump file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV could not be written.
    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convenience result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Outcome of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    /// Completed part-result blocks, each now one CSV row.
    pub records_out: usize,
    /// Total dump lines scanned.
    pub lines_read: usize,
}

/// Convert dump text already in memory into CSV text.
///
/// Block rules: a `Prr` header opens a block and clears any prior state; the
/// `PART_ID` field closes the block and emits its row (missing fields become
/// empty columns, `PART_TXT` is quoted); a header of any other record type
/// discards an unfinished block, as does end of input.
pub fn dump_to_csv(text: &str) -> (String, ConvertReport) {
    let prr_header = Regex::new(r"^Record \d+, type=Prr, \d+ entries:?$").unwrap();
    let any_header = Regex::new(r"^Record \d+, type=\w+, \d+ entries:?$").unwrap();
    // KEY = VALUE with an optional trailing parenthesized type annotation.
    let field = Regex::new(r"^\s*(\w+)\s*=\s*(.+?)(?:\s*\(.+?\))?$").unwrap();

    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    let mut inside_prr = false;
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut records_out = 0usize;
    let mut lines_read = 0usize;

    for raw in text.lines() {
        lines_read += 1;
        let line = raw.trim();

        if prr_header.is_match(line) {
            inside_prr = true;
            fields.clear();
            continue;
        }
        if any_header.is_match(line) {
            // Some other record type starts; whatever Prr fields were
            // collected never completed, so they are dropped.
            inside_prr = false;
            fields.clear();
            continue;
        }
        if !inside_prr {
            continue;
        }

        if let Some(caps) = field.captures(line) {
            let name = caps[1].trim().to_string();
            let mut value = caps[2].trim().to_string();
            if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
                value = value[1..value.len() - 1].to_string();
            }
            let done = name == "PART_ID";
            fields.push((name, value));

            if done {
                csv.push_str(&csv_row(&fields));
                csv.push('\n');
                records_out += 1;
                inside_prr = false;
                fields.clear();
            }
        }
    }

    (csv, ConvertReport { records_out, lines_read })
}

/// Convert a dump file into a CSV file.
pub fn convert_dump(input: &Path, output: &Path) -> ConvertResult<ConvertReport> {
    if !input.is_file() {
        return Err(ConvertError::SourceMissing(input.to_path_buf()));
    }
    let text = fs::read_to_string(input)
        .map_err(|source| ConvertError::ReadInput { path: input.to_path_buf(), source })?;

    let (csv, report) = dump_to_csv(&text);

    fs::write(output, csv)
        .map_err(|source| ConvertError::WriteOutput { path: output.to_path_buf(), source })?;
    Ok(report)
}

fn csv_row(fields: &[(String, String)]) -> String {
    let value = |name: &str| {
        fields.iter().rev().find(|(n, _)| n == name).map(|(_, v)| v.as_str()).unwrap_or("")
    };
    let mut columns: Vec<String> = Vec::with_capacity(EXTRACTED_FIELDS.len());
    for name in EXTRACTED_FIELDS {
        if name == "PART_TXT" {
            columns.push(format!("\"{}\"", value(name)));
        } else {
            columns.push(value(name).to_string());
        }
    }
    columns.join(",")
}
