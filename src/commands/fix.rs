use crate::config::AppConfig;
use crate::rewrite::{RewriteOutcome, rewrite_file};
use anyhow::{Context, Result};
use glob::glob;
use std::path::{Component, Path};
use std::time::{SystemTime, UNIX_EPOCH};

/// Execute the fix command from the current working directory.
pub fn fix(config: &AppConfig, dry_run: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    fix_in(&cwd, config, dry_run)
}

/// Rewrite plain imports for every file matching the configured glob under
/// `root`, excluding vendored-dependency paths.
///
/// One timestamp is taken per run and shared by every backup. A file that
/// fails to read or write is logged and skipped; the run always succeeds.
pub fn fix_in(root: &Path, config: &AppConfig, dry_run: bool) -> Result<()> {
    println!("Root: {}", root.display());
    println!("Dry run: {}", if dry_run { "yes" } else { "no" });

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?
        .as_secs();

    let pattern = root.join(&config.fix.pattern);
    let paths = glob(&pattern.to_string_lossy())
        .with_context(|| format!("bad glob pattern: {}", config.fix.pattern))?;

    let mut examined = 0usize;
    let mut modified: Vec<RewriteOutcome> = Vec::new();
    for entry in paths {
        let path = match entry {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!("skipping unreadable glob entry: {}", err);
                continue;
            }
        };
        if !path.is_file() || is_vendored(&path, root, &config.scan.skip_dirs) {
            continue;
        }
        examined += 1;
        match rewrite_file(&path, timestamp, dry_run) {
            Ok(Some(outcome)) => {
                println!(
                    "Will modify: {} -> backup: {}",
                    outcome.file.display(),
                    outcome.backup.display()
                );
                modified.push(outcome);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::error!("error processing {}: {:#}", path.display(), err);
            }
        }
    }

    if modified.is_empty() {
        println!("No plain imports found to change ({examined} files examined).");
        return Ok(());
    }

    println!("\nSummary:");
    for m in &modified {
        println!("  {}  (backup: {})", m.file.display(), m.backup.display());
    }
    println!(
        "\nExamined {} files, {} {} modified.",
        examined,
        modified.len(),
        if dry_run { "would be" } else { "were" }
    );
    if dry_run {
        println!("Dry run complete. No files were changed. Re-run without --dry to apply.");
    }
    Ok(())
}

/// A path is vendored when any directory component below `root` carries one
/// of the configured skip names.
fn is_vendored(path: &Path, root: &Path, skip_dirs: &[String]) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let Some(parent) = rel.parent() else {
        return false;
    };
    parent.components().any(|c| match c {
        Component::Normal(os) => os
            .to_str()
            .is_some_and(|name| skip_dirs.iter().any(|d| d == name)),
        _ => false,
    })
}
