use anyhow::{anyhow, Context, Result};
use wafermap_core::layout::OutputLayout;
use wafermap_core::render::{self, ColorScheme, RenderOptions};

use crate::commands::{ensure_dir, load_grid, report_issues};

/// Which raster maps a render invocation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    PartId,
    Bin,
    Both,
}

impl RenderMode {
    pub fn includes(self, scheme: ColorScheme) -> bool {
        match self {
            RenderMode::PartId => scheme == ColorScheme::PartId,
            RenderMode::Bin => scheme == ColorScheme::Bin,
            RenderMode::Both => true,
        }
    }
}

/// Parse the `--mode` flag.
pub fn validate_render_mode(mode: &str) -> Result<RenderMode> {
    match mode {
        "part-id" => Ok(RenderMode::PartId),
        "bin" => Ok(RenderMode::Bin),
        "both" => Ok(RenderMode::Both),
        other => Err(anyhow!("Invalid mode '{}'. Allowed: part-id, bin, both", other)),
    }
}

/// Render the requested wafer map images into the output directory.
pub fn render_command(
    input: &str,
    out_dir: &str,
    mode: &str,
    cell_size: u32,
    padding: u32,
) -> Result<()> {
    let mode = validate_render_mode(mode)?;
    let report = load_grid(input)?;
    report_issues(&report.issues);

    let layout = OutputLayout::new(out_dir);
    ensure_dir(&layout.out_dir)?;

    let options = RenderOptions { cell_size, padding };
    let grid = &report.grid;

    if grid.is_empty() {
        eprintln!("warning: no valid records in {input}, rendering the no-data placeholder");
    }

    if mode.includes(ColorScheme::PartId) {
        let map = render::render(grid, ColorScheme::PartId, options)
            .context("Failed to render part-id map")?;
        map.save_png(&layout.part_id_map_path).with_context(|| {
            format!("Failed to write map image {}", layout.part_id_map_path.display())
        })?;
        println!("Wrote {}", layout.part_id_map_path.display());
    }

    if mode.includes(ColorScheme::Bin) {
        let map =
            render::render(grid, ColorScheme::Bin, options).context("Failed to render bin map")?;
        map.save_png(&layout.bin_map_path).with_context(|| {
            format!("Failed to write map image {}", layout.bin_map_path.display())
        })?;
        println!("Wrote {}", layout.bin_map_path.display());
    }

    Ok(())
}
