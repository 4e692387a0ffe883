//! Textual views over a built grid: the console wafer map, the three-line
//! yield summary artifact, and a machine-readable stats struct.

use crate::grid::{GridBounds, WaferGrid};

/// Aggregate statistics for one grid, shaped for JSON output.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WaferStats {
    /// Insert events, not distinct coordinates.
    pub total_chips: u64,
    pub pass_count: u64,
    /// Percentage, 0.0 for an empty grid.
    pub yield_rate: f64,
    /// Absent for an empty grid.
    pub bounds: Option<GridBounds>,
}

impl WaferStats {
    pub fn from_grid(grid: &WaferGrid) -> Self {
        Self {
            total_chips: grid.total_chips(),
            pass_count: grid.pass_count(),
            yield_rate: grid.yield_rate(),
            bounds: grid.bounds(),
        }
    }
}

/// The three-line yield summary, exactly as the artifact file carries it.
pub fn yield_summary(grid: &WaferGrid) -> String {
    format!(
        "Total Chips: {}\nPASS (BIN=1): {}\nYield Rate: {:.2}%\n",
        grid.total_chips(),
        grid.pass_count(),
        grid.yield_rate()
    )
}

/// Character-grid wafer map: rows from max Y down to min Y, `P`/`F` for
/// tested cells, `.` for absent sites, coordinate labels on both axes.
///
/// This is the textual twin of the by-bin raster and must classify every
/// coordinate in the bounding box exactly the same way.
pub fn text_map(grid: &WaferGrid) -> String {
    let Some(bounds) = grid.bounds() else {
        return "No wafer data.\n".to_string();
    };

    let mut out = String::new();
    out.push_str(&format!(
        "Grid range: X [{},{}], Y [{},{}]\n",
        bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y
    ));

    out.push_str("       ");
    for x in bounds.min_x..=bounds.max_x {
        out.push_str(&format!("{x:>4}"));
    }
    out.push('\n');

    for y in (bounds.min_y..=bounds.max_y).rev() {
        out.push_str(&format!("{y:>4}   "));
        for x in bounds.min_x..=bounds.max_x {
            let symbol = cell_symbol(grid, x, y);
            out.push_str(&format!("{symbol:>4}"));
        }
        out.push('\n');
    }

    out
}

/// Status symbol for one coordinate, shared with [`text_map`].
pub fn cell_symbol(grid: &WaferGrid, x: i32, y: i32) -> char {
    match grid.lookup(x, y) {
        Some(record) => record.status().symbol(),
        None => '.',
    }
}
