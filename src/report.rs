use crate::scan::ScanResult;
use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::Path;

/// Render a scan result for the terminal, returning the total issue count.
///
/// The caller translates a nonzero total into the process exit status.
pub fn print_console(result: &ScanResult) -> usize {
    let mut total = 0usize;
    for entry in &result.entries {
        println!("\nFile: {}", entry.file.display());
        for issue in &entry.issues {
            println!(
                "  - [{}] line {}: {}",
                issue.label(),
                issue.line(),
                issue.content()
            );
            total += 1;
        }
    }
    println!("\nScanned {} Solidity files.", result.scanned);
    println!(
        "Found {} potential issue{}.",
        total,
        if total == 1 { "" } else { "s" }
    );
    if total == 0 {
        println!("No obvious import/modifier issues found.");
    }
    total
}

/// Compose the persisted report object (pure, for testing).
pub fn compose_report_json(result: &ScanResult) -> serde_json::Value {
    json!({
        "scanned": result.scanned,
        "files_with_issues": result.entries.len(),
        "details": result.entries,
    })
}

/// Serialize the scan result to `path`, replacing any previous report.
///
/// This strategy never fails on findings: an issue-laden tree still produces
/// a successful archival run.
pub fn write_json_report(result: &ScanResult, path: &Path) -> Result<()> {
    let out = serde_json::to_string_pretty(&compose_report_json(result))
        .context("failed to serialize report")?;
    fs::write(path, out).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
