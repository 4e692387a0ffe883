use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use wafermap_core::report::{self, WaferStats};

use crate::commands::{ensure_parent_dir, load_grid, report_issues};

/// Print the yield summary, optionally writing the three-line artifact file.
///
/// `--json` swaps the printed form for the machine-readable stats; the
/// artifact file keeps the historical text format either way.
pub fn summary_command(input: &str, output: Option<String>, json: bool) -> Result<()> {
    let report = load_grid(input)?;
    report_issues(&report.issues);

    let summary = report::yield_summary(&report.grid);

    if json {
        let stats = WaferStats::from_grid(&report.grid);
        let serialized =
            serde_json::to_string_pretty(&stats).context("Failed to serialize stats to JSON")?;
        println!("{serialized}");
    } else {
        print!("{summary}");
    }

    if let Some(output) = output {
        let output_path = Path::new(&output);
        ensure_parent_dir(output_path)?;
        fs::write(output_path, &summary)
            .with_context(|| format!("Failed to write yield summary {output}"))?;
        println!("Wrote {output}");
    }

    Ok(())
}
