use wafermap_core::{grid, report, version};

#[test]
fn version_is_non_empty() {
    let v = version();
    assert!(!v.is_empty());
}

#[test]
fn ingest_to_summary_pipeline_works_end_to_end() {
    let text = "PRR|1|1|0|0|0|0|0|0|0|1|1.0\nPRR|1|1|0|0|0|0|1|0|0|2|0.0\n";
    let loaded = grid::ingest(text);
    let summary = report::yield_summary(&loaded.grid);
    assert_eq!(summary, "Total Chips: 2\nPASS (BIN=1): 1\nYield Rate: 50.00%\n");
}
