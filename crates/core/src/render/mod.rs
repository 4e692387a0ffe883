//! Raster wafer maps.
//!
//! One traversal serves both display modes: it walks the full inclusive
//! bounding box (absent sites included), paints each cell through the chosen
//! [`ColorScheme`], and labels both axes once per integer step. The vertical
//! axis is inverted on the way in (grid Y grows upward, raster rows grow
//! downward); nothing stores inverted coordinates.

mod buffer;
mod color;
mod font;

use thiserror::Error;

use crate::grid::WaferGrid;

pub use buffer::PixelBuffer;
pub use color::{hsv_to_rgb, ColorScheme, Palette};

/// One RGBA color, 8 bits per channel.
pub type Rgba = [u8; 4];

/// Per-side pixel limit for rendered maps. Pathological coordinates (one die
/// at each end of the i32 range) would otherwise ask for a terabyte image.
pub const MAX_MAP_DIMENSION: u32 = 16_384;

/// Placeholder size for renders of an empty grid.
pub const PLACEHOLDER_WIDTH: u32 = 300;
/// See [`PLACEHOLDER_WIDTH`].
pub const PLACEHOLDER_HEIGHT: u32 = 200;

const PLACEHOLDER_MESSAGE: &str = "NO WAFER DATA";

/// Error type for map rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Cells below 2 px cannot hold the 1 px gap between fill and neighbor.
    #[error("cell size {0} px is too small to draw")]
    CellTooSmall(u32),

    /// The bounding box at this cell size exceeds [`MAX_MAP_DIMENSION`].
    #[error("map of {width}x{height} px exceeds the {max} px per-side limit")]
    MapTooLarge { width: u64, height: u64, max: u32 },

    /// PNG encoding or writing failed.
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Convenience result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Geometry knobs for the raster maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Square cell edge in pixels.
    pub cell_size: u32,
    /// Margin around the cell area, also where the axis labels live.
    pub padding: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { cell_size: 20, padding: 30 }
    }
}

/// Render the wafer map for one color scheme.
///
/// An empty grid short-circuits to a fixed-size placeholder image instead of
/// iterating bounds that do not exist.
pub fn render(
    grid: &WaferGrid,
    scheme: ColorScheme,
    options: RenderOptions,
) -> RenderResult<PixelBuffer> {
    if options.cell_size < 2 {
        return Err(RenderError::CellTooSmall(options.cell_size));
    }

    let Some(bounds) = grid.bounds() else {
        return Ok(no_data_placeholder());
    };

    let cell = options.cell_size as u64;
    let pad = options.padding as u64;
    let width = bounds.span_x() * cell + 2 * pad;
    let height = bounds.span_y() * cell + 2 * pad;
    if width > MAX_MAP_DIMENSION as u64 || height > MAX_MAP_DIMENSION as u64 {
        return Err(RenderError::MapTooLarge { width, height, max: MAX_MAP_DIMENSION });
    }

    let mut buf = PixelBuffer::new(width as u32, height as u32, Palette::BACKGROUND);

    let cell = options.cell_size as i64;
    let pad = options.padding as i64;
    let glyph_h = font::GLYPH_H as i64;

    // Anchors chosen so (min_x, max_y) lands at (pad, pad): X grows right,
    // grid Y grows up while raster rows grow down.
    let offset_x = pad - bounds.min_x as i64 * cell;
    let offset_y = pad + bounds.max_y as i64 * cell;
    let cell_edge = options.cell_size - 1;

    for y in bounds.min_y..=bounds.max_y {
        for x in bounds.min_x..=bounds.max_x {
            let draw_x = offset_x + x as i64 * cell;
            let draw_y = offset_y - y as i64 * cell;

            match grid.lookup(x, y) {
                Some(record) => {
                    let fill = scheme.color_for(record, grid.total_chips());
                    buf.fill_rect(draw_x, draw_y, cell_edge, cell_edge, fill);
                    buf.draw_rect(draw_x, draw_y, cell_edge, cell_edge, Palette::OUTLINE);
                    if scheme == ColorScheme::PartId {
                        let text_w = PixelBuffer::text_width(&record.part_id) as i64;
                        let tx = draw_x + (cell - text_w) / 2;
                        let ty = draw_y + (cell - glyph_h) / 2;
                        buf.draw_text(tx, ty, &record.part_id, Palette::LABEL);
                    }
                }
                None => {
                    buf.fill_rect(draw_x, draw_y, cell_edge, cell_edge, Palette::NO_DATA);
                    buf.draw_rect(draw_x, draw_y, cell_edge, cell_edge, Palette::OUTLINE);
                }
            }
        }
    }

    // X labels centered over each column in the top margin.
    for x in bounds.min_x..=bounds.max_x {
        let label = x.to_string();
        let text_w = PixelBuffer::text_width(&label) as i64;
        let tx = offset_x + x as i64 * cell + cell / 2 - text_w / 2;
        let ty = (pad - glyph_h) / 2;
        buf.draw_text(tx, ty, &label, Palette::LABEL);
    }

    // Y labels centered beside each row in the left margin.
    for y in bounds.min_y..=bounds.max_y {
        let label = y.to_string();
        let text_w = PixelBuffer::text_width(&label) as i64;
        let tx = pad / 2 - text_w / 2;
        let ty = offset_y - y as i64 * cell + cell / 2 - glyph_h / 2;
        buf.draw_text(tx, ty, &label, Palette::LABEL);
    }

    Ok(buf)
}

fn no_data_placeholder() -> PixelBuffer {
    let mut buf = PixelBuffer::new(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, Palette::BACKGROUND);
    buf.draw_text(30, 30, PLACEHOLDER_MESSAGE, Palette::FAIL);
    buf
}
