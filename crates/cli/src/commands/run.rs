use std::fs;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use wafermap_core::layout::OutputLayout;
use wafermap_core::render::{self, ColorScheme, RenderOptions};
use wafermap_core::report::{self, WaferStats};

use crate::commands::{ensure_dir, load_grid, report_issues};

/// Bookkeeping record written next to the artifacts of a full pipeline run.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunMetadata {
    pub input: String,
    /// Every line seen, record or not.
    pub lines_read: usize,
    /// Lines dropped by the parser.
    pub skipped_lines: usize,
    pub stats: WaferStats,
    pub artifacts: Vec<String>,
    pub started_at: String,
    pub finished_at: String,
}

/// Full pipeline: console map, yield summary artifact, both raster maps, and
/// a run metadata record describing what was produced.
pub fn run_command(input: &str, out_dir: &str, cell_size: u32, padding: u32) -> Result<()> {
    let started_at = Utc::now().to_rfc3339();

    let report = load_grid(input)?;
    report_issues(&report.issues);

    println!("--- Wafer Map (P: Pass, F: Fail) ---");
    print!("{}", report::text_map(&report.grid));

    let layout = OutputLayout::new(out_dir);
    ensure_dir(&layout.out_dir)?;

    let summary = report::yield_summary(&report.grid);
    fs::write(&layout.summary_path, &summary).with_context(|| {
        format!("Failed to write yield summary {}", layout.summary_path.display())
    })?;

    let options = RenderOptions { cell_size, padding };
    let maps =
        [(ColorScheme::PartId, &layout.part_id_map_path), (ColorScheme::Bin, &layout.bin_map_path)];
    for (scheme, path) in maps {
        let map = render::render(&report.grid, scheme, options)
            .with_context(|| format!("Failed to render {}", path.display()))?;
        map.save_png(path)
            .with_context(|| format!("Failed to write map image {}", path.display()))?;
    }

    let artifacts = vec![
        layout.summary_path.display().to_string(),
        layout.part_id_map_path.display().to_string(),
        layout.bin_map_path.display().to_string(),
    ];
    let metadata = RunMetadata {
        input: input.to_string(),
        lines_read: report.lines_read,
        skipped_lines: report.skipped_lines(),
        stats: WaferStats::from_grid(&report.grid),
        artifacts,
        started_at,
        finished_at: Utc::now().to_rfc3339(),
    };
    fs::write(&layout.metadata_path, serde_json::to_string_pretty(&metadata)?).with_context(
        || format!("Failed to write run metadata at {}", layout.metadata_path.display()),
    )?;

    println!("Run complete:");
    println!("  Total chips: {}", report.grid.total_chips());
    println!("  Yield: {:.2}%", report.grid.yield_rate());
    println!("  Summary: {}", layout.summary_path.display());
    println!("  Part-id map: {}", layout.part_id_map_path.display());
    println!("  Bin map: {}", layout.bin_map_path.display());
    println!("  Metadata: {}", layout.metadata_path.display());

    Ok(())
}
