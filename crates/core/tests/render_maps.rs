use tempfile::tempdir;
use wafermap_core::grid::{self, WaferGrid};
use wafermap_core::record::DieRecord;
use wafermap_core::render::{
    self, hsv_to_rgb, ColorScheme, Palette, RenderError, RenderOptions, PLACEHOLDER_HEIGHT,
    PLACEHOLDER_WIDTH,
};
use wafermap_core::report;

const CELL: u32 = 20;
const PAD: u32 = 30;

fn default_options() -> RenderOptions {
    RenderOptions::default()
}

/// Three-die grid from the reference scenario: pass at (0,0), fails at (1,0)
/// and (0,1), site (1,1) untested.
fn sample_grid() -> WaferGrid {
    let mut grid = WaferGrid::new();
    grid.insert(DieRecord::new(0, 0, "1", 1));
    grid.insert(DieRecord::new(1, 0, "2", 0));
    grid.insert(DieRecord::new(0, 1, "3", 2));
    grid
}

/// Top-left pixel of the cell for grid coordinate `(x, y)`.
fn cell_origin(grid: &WaferGrid, x: i32, y: i32) -> (u32, u32) {
    let bounds = grid.bounds().expect("bounds");
    let px = PAD + (x - bounds.min_x) as u32 * CELL;
    let py = PAD + (bounds.max_y - y) as u32 * CELL;
    (px, py)
}

#[test]
fn image_dimensions_follow_bounding_box_and_options() {
    let grid = sample_grid();
    let map = render::render(&grid, ColorScheme::Bin, default_options()).expect("render");
    // 2x2 bounding box: (span * cell) + padding on both sides.
    assert_eq!(map.width(), 2 * CELL + 2 * PAD);
    assert_eq!(map.height(), 2 * CELL + 2 * PAD);

    let small = render::render(&grid, ColorScheme::Bin, RenderOptions { cell_size: 4, padding: 8 })
        .expect("render");
    assert_eq!(small.width(), 2 * 4 + 2 * 8);
    assert_eq!(small.height(), 2 * 4 + 2 * 8);
}

#[test]
fn bin_map_paints_pass_fail_and_absent_cells() {
    let grid = sample_grid();
    let map = render::render(&grid, ColorScheme::Bin, default_options()).expect("render");

    // Sample an interior pixel of each cell, clear of the 1 px outline.
    let (px, py) = cell_origin(&grid, 0, 0);
    assert_eq!(map.pixel(px + 10, py + 10), Some(Palette::PASS));
    let (px, py) = cell_origin(&grid, 1, 0);
    assert_eq!(map.pixel(px + 10, py + 10), Some(Palette::FAIL));
    let (px, py) = cell_origin(&grid, 0, 1);
    assert_eq!(map.pixel(px + 10, py + 10), Some(Palette::FAIL));
    // (1, 1) has no record: neutral fill, still outlined.
    let (px, py) = cell_origin(&grid, 1, 1);
    assert_eq!(map.pixel(px + 10, py + 10), Some(Palette::NO_DATA));
    assert_eq!(map.pixel(px, py), Some(Palette::OUTLINE));

    // Corner of the margin stays background.
    assert_eq!(map.pixel(0, 0), Some(Palette::BACKGROUND));
}

#[test]
fn largest_y_lands_at_the_top_of_the_raster() {
    let grid = sample_grid();
    let map = render::render(&grid, ColorScheme::Bin, default_options()).expect("render");

    let (_, py_high) = cell_origin(&grid, 0, 1);
    let (_, py_low) = cell_origin(&grid, 0, 0);
    assert!(py_high < py_low, "grid Y grows upward, raster rows grow downward");

    // The y=1 row of cells starts right after the top margin.
    assert_eq!(py_high, PAD);
    // Fail cell (0,1) at the top, pass cell (0,0) below it.
    assert_eq!(map.pixel(PAD + 10, PAD + 10), Some(Palette::FAIL));
    assert_eq!(map.pixel(PAD + 10, PAD + CELL + 10), Some(Palette::PASS));
}

#[test]
fn negative_coordinates_render_inside_the_box() {
    let mut grid = WaferGrid::new();
    grid.insert(DieRecord::new(-1, -1, "1", 1));
    grid.insert(DieRecord::new(1, 1, "2", 0));
    let map = render::render(&grid, ColorScheme::Bin, default_options()).expect("render");

    // 3x3 box regardless of sign.
    assert_eq!(map.width(), 3 * CELL + 2 * PAD);
    assert_eq!(map.height(), 3 * CELL + 2 * PAD);

    // (1,1) is top-right, (-1,-1) bottom-left.
    let (px, py) = cell_origin(&grid, 1, 1);
    assert_eq!((px, py), (PAD + 2 * CELL, PAD));
    assert_eq!(map.pixel(px + 10, py + 10), Some(Palette::FAIL));
    let (px, py) = cell_origin(&grid, -1, -1);
    assert_eq!((px, py), (PAD, PAD + 2 * CELL));
    assert_eq!(map.pixel(px + 10, py + 10), Some(Palette::PASS));

    // The five untested sites in between render as no-data.
    let (px, py) = cell_origin(&grid, 0, 0);
    assert_eq!(map.pixel(px + 10, py + 10), Some(Palette::NO_DATA));
}

#[test]
fn bin_map_agrees_with_text_map_on_every_cell() {
    let mut grid = WaferGrid::new();
    grid.insert(DieRecord::new(-1, -1, "1", 1));
    grid.insert(DieRecord::new(0, 0, "2", 0));
    grid.insert(DieRecord::new(1, 1, "3", 1));
    grid.insert(DieRecord::new(1, -1, "4", 7));

    let map = render::render(&grid, ColorScheme::Bin, default_options()).expect("render");
    let bounds = grid.bounds().expect("bounds");

    for y in bounds.min_y..=bounds.max_y {
        for x in bounds.min_x..=bounds.max_x {
            let (px, py) = cell_origin(&grid, x, y);
            let color = map.pixel(px + 10, py + 10).expect("inside image");
            let expected = match report::cell_symbol(&grid, x, y) {
                'P' => Palette::PASS,
                'F' => Palette::FAIL,
                '.' => Palette::NO_DATA,
                other => panic!("unexpected symbol {other}"),
            };
            assert_eq!(color, expected, "cell ({x},{y}) disagrees with the text map");
        }
    }
}

#[test]
fn part_id_map_colors_follow_the_hue_gradient() {
    let grid = sample_grid();
    let map = render::render(&grid, ColorScheme::PartId, default_options()).expect("render");

    // Sample near the cell corner, above the centered identifier text.
    for (x, y, id) in [(0, 0, 1i64), (1, 0, 2), (0, 1, 3)] {
        let (px, py) = cell_origin(&grid, x, y);
        let hue = id as f64 / (grid.total_chips() as f64 + 1.0) * 360.0;
        let expected = hsv_to_rgb(hue, 0.8, 0.9);
        assert_eq!(map.pixel(px + 2, py + 2), Some(expected), "cell ({x},{y})");
    }

    // Untested sites keep the neutral fill in this mode too.
    let (px, py) = cell_origin(&grid, 1, 1);
    assert_eq!(map.pixel(px + 2, py + 2), Some(Palette::NO_DATA));
}

#[test]
fn equal_identifiers_get_equal_hues() {
    let mut grid = WaferGrid::new();
    grid.insert(DieRecord::new(0, 0, "5", 1));
    grid.insert(DieRecord::new(1, 0, "5", 0));
    let map = render::render(&grid, ColorScheme::PartId, default_options()).expect("render");

    let (ax, ay) = cell_origin(&grid, 0, 0);
    let (bx, by) = cell_origin(&grid, 1, 0);
    assert_eq!(map.pixel(ax + 2, ay + 2), map.pixel(bx + 2, by + 2));
}

#[test]
fn part_id_map_overlays_identifier_text() {
    let grid = sample_grid();
    let map = render::render(&grid, ColorScheme::PartId, default_options()).expect("render");

    // The fill has value 0.9, so pure black inside the cell can only be the
    // label glyphs (the outline ring is excluded from the scan).
    let (px, py) = cell_origin(&grid, 0, 0);
    let mut label_pixels = 0;
    for dy in 1..CELL - 2 {
        for dx in 1..CELL - 2 {
            if map.pixel(px + dx, py + dy) == Some(Palette::LABEL) {
                label_pixels += 1;
            }
        }
    }
    assert!(label_pixels > 0, "identifier text missing from part-id cell");
}

#[test]
fn bin_map_has_no_text_inside_cells() {
    let grid = sample_grid();
    let map = render::render(&grid, ColorScheme::Bin, default_options()).expect("render");

    let (px, py) = cell_origin(&grid, 0, 0);
    for dy in 1..CELL - 2 {
        for dx in 1..CELL - 2 {
            assert_eq!(map.pixel(px + dx, py + dy), Some(Palette::PASS), "at +({dx},{dy})");
        }
    }
}

#[test]
fn non_numeric_identifier_falls_back_instead_of_failing() {
    let mut grid = WaferGrid::new();
    grid.insert(DieRecord::new(0, 0, "A7", 1));
    let map = render::render(&grid, ColorScheme::PartId, default_options()).expect("render");

    // Falls back to numeric value 0, which is hue 0.
    let (px, py) = cell_origin(&grid, 0, 0);
    assert_eq!(map.pixel(px + 2, py + 2), Some(hsv_to_rgb(0.0, 0.8, 0.9)));
}

#[test]
fn axis_labels_are_drawn_in_both_margins() {
    let grid = sample_grid();
    let map = render::render(&grid, ColorScheme::Bin, default_options()).expect("render");

    // X labels live in the top margin, above every cell row.
    let mut top_label_pixels = 0;
    for y in 0..PAD {
        for x in 0..map.width() {
            if map.pixel(x, y) == Some(Palette::LABEL) {
                top_label_pixels += 1;
            }
        }
    }
    assert!(top_label_pixels > 0, "missing X axis labels");

    // Y labels live in the left margin, beside the cell rows.
    let mut left_label_pixels = 0;
    for y in PAD..map.height() {
        for x in 0..PAD {
            if map.pixel(x, y) == Some(Palette::LABEL) {
                left_label_pixels += 1;
            }
        }
    }
    assert!(left_label_pixels > 0, "missing Y axis labels");
}

#[test]
fn empty_grid_renders_the_no_data_placeholder() {
    let grid = WaferGrid::new();
    for scheme in [ColorScheme::PartId, ColorScheme::Bin] {
        let map = render::render(&grid, scheme, default_options()).expect("render");
        assert_eq!(map.width(), PLACEHOLDER_WIDTH);
        assert_eq!(map.height(), PLACEHOLDER_HEIGHT);

        // The placeholder carries a red message on a plain background.
        let mut message_pixels = 0;
        for y in 0..map.height() {
            for x in 0..map.width() {
                if map.pixel(x, y) == Some(Palette::FAIL) {
                    message_pixels += 1;
                }
            }
        }
        assert!(message_pixels > 0, "placeholder message missing");
    }
}

#[test]
fn tiny_cell_size_is_rejected() {
    let grid = sample_grid();
    let err = render::render(&grid, ColorScheme::Bin, RenderOptions { cell_size: 1, padding: 30 })
        .unwrap_err();
    assert!(matches!(err, RenderError::CellTooSmall(1)), "unexpected error: {err}");
}

#[test]
fn oversized_bounding_box_is_rejected() {
    let mut grid = WaferGrid::new();
    grid.insert(DieRecord::new(0, 0, "1", 1));
    grid.insert(DieRecord::new(2000, 0, "2", 1));

    let err = render::render(&grid, ColorScheme::Bin, default_options()).unwrap_err();
    match err {
        RenderError::MapTooLarge { width, .. } => {
            assert_eq!(width, 2001 * CELL as u64 + 2 * PAD as u64);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn save_png_writes_a_decodable_image() {
    let grid = sample_grid();
    let map = render::render(&grid, ColorScheme::Bin, default_options()).expect("render");

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("wafer_map_bin.png");
    map.save_png(&path).expect("save png");

    let decoded = image::open(&path).expect("decode png").to_rgba8();
    assert_eq!(decoded.width(), map.width());
    assert_eq!(decoded.height(), map.height());

    // Spot-check one pass cell survived the encode round trip.
    let (px, py) = cell_origin(&grid, 0, 0);
    assert_eq!(decoded.get_pixel(px + 10, py + 10).0, Palette::PASS);
}

#[test]
fn render_from_ingested_stream_matches_direct_inserts() {
    let text = "PRR|1|1|0|0|0|0|0|0|0|1|1.0\nPRR|1|1|0|0|0|0|1|0|0|2|0.0\n";
    let report = grid::ingest(text);
    let map = render::render(&report.grid, ColorScheme::Bin, default_options()).expect("render");
    assert_eq!(map.width(), 2 * CELL + 2 * PAD);
    assert_eq!(map.height(), CELL + 2 * PAD);

    let (px, py) = cell_origin(&report.grid, 0, 0);
    assert_eq!(map.pixel(px + 10, py + 10), Some(Palette::PASS));
    let (px, py) = cell_origin(&report.grid, 1, 0);
    assert_eq!(map.pixel(px + 10, py + 10), Some(Palette::FAIL));
}
