use crate::config::AppConfig;
use crate::report::write_json_report;
use crate::scan::scan_tree;
use anyhow::Result;
use std::path::Path;

/// Execute the report command: same traversal and classification as scan,
/// persisted as JSON instead of printed. Always succeeds on findings.
pub fn report(root: &Path, config: &AppConfig) -> Result<()> {
    let result = scan_tree(root, &config.scan);
    write_json_report(&result, &config.scan.report_path)?;
    println!(
        "Report written to {} (issues in {} file{}).",
        config.scan.report_path.display(),
        result.entries.len(),
        if result.entries.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
