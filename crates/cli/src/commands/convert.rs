use std::path::Path;

use anyhow::{Context, Result};
use wafermap_core::convert;

use crate::commands::ensure_parent_dir;

/// Convert a raw instrumentation dump into the intermediate CSV.
pub fn convert_command(input: &str, output: &str) -> Result<()> {
    let output_path = Path::new(output);
    ensure_parent_dir(output_path)?;

    let report = convert::convert_dump(Path::new(input), output_path)
        .with_context(|| format!("Failed to convert dump {input}"))?;

    println!("Converted dump:");
    println!("  Input: {input}");
    println!("  Lines read: {}", report.lines_read);
    println!("  Records out: {}", report.records_out);
    println!("  Output: {output}");

    Ok(())
}
