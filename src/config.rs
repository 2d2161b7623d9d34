use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration with all defaults applied.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scan: ScanConfig,
    pub fix: FixConfig,
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory names pruned during traversal (vendored dependencies).
    pub skip_dirs: Vec<String>,
    /// Solidity source suffixes considered candidates.
    pub extensions: Vec<String>,
    /// When true, match the full multi-part suffix (".t.sol" is distinct from
    /// ".sol"). When false, only the final dot-segment is compared, so all
    /// configured suffixes collapse onto their last segment.
    pub match_full_suffix: bool,
    /// Destination of the persisted JSON report.
    pub report_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct FixConfig {
    /// Glob evaluated from the working directory by the fix command.
    pub pattern: String,
}

// --- Raw TOML structures ---
#[derive(Deserialize, Default)]
struct RawConfig {
    scan: Option<RawScan>,
    fix: Option<RawFix>,
}

#[derive(Deserialize, Default)]
struct RawScan {
    skip_dirs: Option<Vec<String>>,
    extensions: Option<Vec<String>>,
    match_full_suffix: Option<bool>,
    report_path: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawFix {
    pattern: Option<String>,
}

const DEFAULT_CONFIG_FILE: &str = "solfix.toml";

impl AppConfig {
    /// Load configuration from `solfix.toml` (or an explicit path).
    ///
    /// A missing default file yields pure defaults; an explicitly requested
    /// path must exist. A file that exists but fails to parse is an error.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let (path, required) = match config_path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let raw: RawConfig = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?
        } else if required {
            anyhow::bail!("config file not found: {}", path.display());
        } else {
            RawConfig::default()
        };

        let scan_raw = raw.scan.unwrap_or_default();
        let scan = ScanConfig {
            skip_dirs: scan_raw
                .skip_dirs
                .unwrap_or_else(|| vec!["lib".into(), "node_modules".into()]),
            extensions: scan_raw
                .extensions
                .unwrap_or_else(|| vec![".sol".into(), ".t.sol".into(), ".s.sol".into()]),
            match_full_suffix: scan_raw.match_full_suffix.unwrap_or(false),
            report_path: scan_raw
                .report_path
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("lint-scan-report.json")),
        };
        let fix_raw = raw.fix.unwrap_or_default();
        let fix = FixConfig {
            pattern: fix_raw.pattern.unwrap_or_else(|| "**/*.sol".into()),
        };

        Ok(Self { scan, fix })
    }
}
