use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tempfile::NamedTempFile;

static NAMED_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bimport\s+\{").unwrap());
static STAR_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bimport\s+\*\s+as\b").unwrap());
static ALIAS_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bimport\s+["'].*["']\s+as\b"#).unwrap());
static PLAIN_IMPORT_ANCHORED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^import\s+["'][^"']+\.sol["'];\s*$"#).unwrap());
static IMPORT_CAPTURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(\s*)import\s+["']([^"']+\.sol)["'];(\s*)$"#).unwrap());

/// Result of one file's rewrite pass.
///
/// `backup` is the path the pre-change copy was (or would be) written to;
/// `applied` is false under dry-run.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub file: PathBuf,
    pub backup: PathBuf,
    pub applied: bool,
}

/// Decide whether a line is a transformable plain import.
///
/// Exclusions (named, star-as, alias-as) are checked against the whole line,
/// then the remainder must match the anchored single-line plain form.
pub fn should_transform(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.starts_with("import") {
        return false;
    }
    if NAMED_IMPORT_RE.is_match(trimmed)
        || STAR_IMPORT_RE.is_match(trimmed)
        || ALIAS_IMPORT_RE.is_match(trimmed)
    {
        return false;
    }
    PLAIN_IMPORT_ANCHORED_RE.is_match(trimmed)
}

/// Derive the binding identifier for an import path.
///
/// Takes the base file name with the `.sol` suffix stripped, prepends an
/// underscore when the name does not start with a letter or underscore, and
/// substitutes underscores for any remaining non-identifier characters.
/// Always yields a usable identifier.
pub fn binding_identifier(import_path: &str) -> String {
    let base = import_path.rsplit('/').next().unwrap_or(import_path);
    let stem = match base.len().checked_sub(4).and_then(|cut| base.get(cut..)) {
        Some(tail) if tail.eq_ignore_ascii_case(".sol") => &base[..base.len() - 4],
        _ => base,
    };
    let mut ident = String::with_capacity(stem.len() + 1);
    if !stem.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
        ident.push('_');
    }
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            ident.push(c);
        } else {
            ident.push('_');
        }
    }
    ident
}

/// Produce the named-import form of a transformable line, preserving the
/// original indentation and trailing whitespace. Returns `None` when the
/// line does not match the capture pattern.
pub fn rewrite_line(line: &str) -> Option<String> {
    let caps = IMPORT_CAPTURE_RE.captures(line)?;
    let indent = caps.get(1).map_or("", |m| m.as_str());
    let import_path = &caps[2];
    let trailing = caps.get(3).map_or("", |m| m.as_str());
    let ident = binding_identifier(import_path);
    Some(format!(
        "{indent}import {{ {ident} }} from \"{import_path}\";{trailing}"
    ))
}

/// Rewrite one file's plain imports under the backup-first protocol.
///
/// Returns `None` when no line was transformable (the file is untouched and
/// no backup is made). When at least one line changed and `dry_run` is false,
/// the original is first copied byte-for-byte to `<file>.bak.<timestamp>`,
/// then the rewritten content is staged in a sibling temp file and renamed
/// over the original. Under dry-run neither file is touched.
pub fn rewrite_file(
    path: &Path,
    timestamp: u64,
    dry_run: bool,
) -> Result<Option<RewriteOutcome>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let mut changed = false;
    let out_lines: Vec<String> = content
        .split('\n')
        .map(|raw| {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if should_transform(line) {
                if let Some(rewritten) = rewrite_line(line) {
                    changed = true;
                    return rewritten;
                }
            }
            line.to_string()
        })
        .collect();

    if !changed {
        return Ok(None);
    }

    let backup = backup_path(path, timestamp);
    if !dry_run {
        fs::copy(path, &backup)
            .with_context(|| format!("failed to back up {} to {}", path.display(), backup.display()))?;

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to stage rewrite for {}", path.display()))?;
        fs::write(tmp.path(), out_lines.join("\n"))
            .with_context(|| format!("failed to write rewrite for {}", path.display()))?;
        tmp.persist(path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
    }

    Ok(Some(RewriteOutcome {
        file: path.to_path_buf(),
        backup,
        applied: !dry_run,
    }))
}

fn backup_path(path: &Path, timestamp: u64) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".bak.{timestamp}"));
    PathBuf::from(name)
}
