use anyhow::Result;
use clap::{Parser, Subcommand};
use wafermap::commands::{
    convert_command, render_command, run_command, show_command, summary_command,
};

/// Wafer test-result mapping and yield reporting CLI.
///
/// This CLI is a thin wrapper around `wafermap-core` (exposed in code as
/// `wafermap_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "wafermap",
    version,
    about = "Wafer test-result mapping and yield reporting",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a raw instrumentation dump into the intermediate CSV.
    ///
    /// Scans part-result record blocks (`Record N, type=Prr, ...` headers
    /// followed by `KEY = VALUE` lines) and writes one CSV row per die.
    Convert {
        /// Path to the dump text file.
        #[arg(long)]
        input: String,

        /// Path of the CSV to write. Parent directories are created.
        #[arg(long)]
        output: String,
    },

    /// Render wafer map images from a record stream.
    ///
    /// Walks the full bounding box of the loaded grid and writes
    /// `wafer_map_part_id.png` and/or `wafer_map_bin.png` into the output
    /// directory.
    Render {
        /// Path to the record stream (one pipe-delimited record per line).
        #[arg(long)]
        input: String,

        /// Directory for the map images. Created if absent.
        #[arg(long, default_value = "output")]
        out_dir: String,

        /// Which maps to produce: part-id, bin, or both.
        #[arg(long, default_value = "both")]
        mode: String,

        /// Cell edge in pixels.
        #[arg(long, default_value_t = 20)]
        cell_size: u32,

        /// Margin around the cell area in pixels.
        #[arg(long, default_value_t = 30)]
        padding: u32,
    },

    /// Print yield statistics, optionally writing the summary artifact.
    Summary {
        /// Path to the record stream.
        #[arg(long)]
        input: String,

        /// Optional path for the three-line summary artifact.
        #[arg(long)]
        output: Option<String>,

        /// Emit JSON instead of the three-line text form.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the character-grid wafer map to stdout.
    Show {
        /// Path to the record stream.
        #[arg(long)]
        input: String,
    },

    /// Full pipeline: console map, yield summary, both map images, and a
    /// run metadata record, all under one output directory.
    Run {
        /// Path to the record stream.
        #[arg(long)]
        input: String,

        /// Directory for all artifacts. Created if absent.
        #[arg(long, default_value = "output")]
        out_dir: String,

        /// Cell edge in pixels.
        #[arg(long, default_value_t = 20)]
        cell_size: u32,

        /// Margin around the cell area in pixels.
        #[arg(long, default_value_t = 30)]
        padding: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert { input, output } => convert_command(&input, &output)?,
        Command::Render { input, out_dir, mode, cell_size, padding } => {
            render_command(&input, &out_dir, &mode, cell_size, padding)?
        }
        Command::Summary { input, output, json } => summary_command(&input, output, json)?,
        Command::Show { input } => show_command(&input)?,
        Command::Run { input, out_dir, cell_size, padding } => {
            run_command(&input, &out_dir, cell_size, padding)?
        }
    }

    Ok(())
}
