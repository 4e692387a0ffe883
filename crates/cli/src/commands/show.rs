use anyhow::Result;
use wafermap_core::report;

use crate::commands::{load_grid, report_issues};

/// Print the character-grid wafer map to stdout.
pub fn show_command(input: &str) -> Result<()> {
    let report = load_grid(input)?;
    report_issues(&report.issues);

    println!("--- Wafer Map (P: Pass, F: Fail) ---");
    print!("{}", report::text_map(&report.grid));

    Ok(())
}
