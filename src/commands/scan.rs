use crate::config::AppConfig;
use crate::report::print_console;
use crate::scan::scan_tree;
use anyhow::Result;
use std::path::Path;

/// Execute the scan command, returning the total issue count.
pub fn scan(root: &Path, config: &AppConfig) -> Result<usize> {
    println!("Scanning Solidity files under: {}", root.display());
    let result = scan_tree(root, &config.scan);
    tracing::debug!(scanned = result.scanned, "scan complete");
    Ok(print_console(&result))
}
