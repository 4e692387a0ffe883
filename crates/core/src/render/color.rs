//! Cell-coloring strategies for the wafer maps.

use crate::record::{DieRecord, DieStatus};

use super::Rgba;

/// Fixed colors shared by the renderers.
pub struct Palette;

impl Palette {
    pub const BACKGROUND: Rgba = [255, 255, 255, 255];
    pub const OUTLINE: Rgba = [0, 0, 0, 255];
    pub const LABEL: Rgba = [0, 0, 0, 255];
    /// Pass cells in bin mode.
    pub const PASS: Rgba = [0, 255, 0, 255];
    /// Fail cells in bin mode; also the no-data placeholder message.
    pub const FAIL: Rgba = [255, 0, 0, 255];
    /// Sites inside the bounding box with no record.
    pub const NO_DATA: Rgba = [192, 192, 192, 255];
}

/// How a populated cell gets its color. Stateless; pass it by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    /// Continuous hue derived from the identifier's numeric value, normalized
    /// by the total population: `hue = id / (total_chips + 1)` of the full
    /// circle, at fixed saturation 0.8 and value 0.9. Equal identifiers get
    /// equal hues; non-numeric identifiers fall back to 0.
    PartId,
    /// Categorical: Pass is green, Fail is red.
    Bin,
}

impl ColorScheme {
    /// Color for a populated cell. Absent cells are not this type's concern;
    /// the renderer paints those from [`Palette::NO_DATA`] directly.
    pub fn color_for(self, record: &DieRecord, total_chips: u64) -> Rgba {
        match self {
            ColorScheme::PartId => {
                let id = record.part_id.trim().parse::<i64>().unwrap_or(0);
                let hue_turns = id as f64 / (total_chips as f64 + 1.0);
                hsv_to_rgb(hue_turns * 360.0, 0.8, 0.9)
            }
            ColorScheme::Bin => match record.status() {
                DieStatus::Pass => Palette::PASS,
                DieStatus::Fail => Palette::FAIL,
            },
        }
    }
}

/// HSV to RGB, hue in degrees (any value, wrapped into [0, 360)), saturation
/// and value in [0, 1].
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgba {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [((r + m) * 255.0) as u8, ((g + m) * 255.0) as u8, ((b + m) * 255.0) as u8, 255]
}
