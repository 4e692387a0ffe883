//! Artifact locations under an output directory.

use std::path::{Path, PathBuf};

/// Computed paths for every artifact a run can produce.
///
/// This is derived from a chosen output directory. It does *not* perform any
/// IO itself; the CLI is responsible for creating directories and writing
/// files based on it.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    /// Root output directory.
    pub out_dir: PathBuf,
    /// Three-line yield summary artifact.
    pub summary_path: PathBuf,
    /// By-identifier raster map.
    pub part_id_map_path: PathBuf,
    /// By-bin raster map.
    pub bin_map_path: PathBuf,
    /// CSV produced by the dump converter.
    pub csv_path: PathBuf,
    /// JSON metadata describing a full pipeline run.
    pub metadata_path: PathBuf,
}

impl OutputLayout {
    /// Compute the default layout under `out_dir`.
    ///
    /// This does *not* touch the filesystem.
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        let out_dir = out_dir.as_ref().to_path_buf();
        let summary_path = out_dir.join("wafer_yield_summary.txt");
        let part_id_map_path = out_dir.join("wafer_map_part_id.png");
        let bin_map_path = out_dir.join("wafer_map_bin.png");
        let csv_path = out_dir.join("converted.csv");
        let metadata_path = out_dir.join("run_metadata.json");

        Self { out_dir, summary_path, part_id_map_path, bin_map_path, csv_path, metadata_path }
    }

    /// Map image path for one render mode, by its artifact stem.
    pub fn map_path(&self, stem: &str) -> PathBuf {
        self.out_dir.join(format!("{stem}.png"))
    }
}
