use crate::config::ScanConfig;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collect candidate Solidity files under `root`.
///
/// Subtrees rooted at a directory named in `config.skip_dirs` are pruned.
/// An unreadable directory entry is logged and skipped; its siblings are
/// still visited. Results are sorted by path for deterministic output.
pub fn discover_files(root: &Path, config: &ScanConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_pruned_dir(e, &config.skip_dirs));
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        if entry.file_type().is_file() && matches_extension(entry.path(), config) {
            files.push(entry.into_path());
        }
    }
    files
}

fn is_pruned_dir(entry: &walkdir::DirEntry, skip_dirs: &[String]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| skip_dirs.iter().any(|d| d == name))
}

/// Candidate test for a single path.
///
/// In full-suffix mode every configured suffix is compared against the whole
/// file name, so ".t.sol" and ".sol" are distinct. In final-segment mode only
/// the text after the last dot is compared, which collapses multi-part
/// suffixes onto their last segment.
pub fn matches_extension(path: &Path, config: &ScanConfig) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if config.match_full_suffix {
        config.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    } else {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        config
            .extensions
            .iter()
            .filter_map(|e| e.rsplit('.').next())
            .any(|last| last == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::fs;
    use tempfile::TempDir;

    fn default_scan() -> ScanConfig {
        AppConfig::load(None).unwrap().scan
    }

    #[test]
    fn finds_sol_files_and_prunes_vendor_dirs() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("lib/forge-std")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("src/A.sol"), "contract A {}\n").unwrap();
        fs::write(root.join("src/A.t.sol"), "contract ATest {}\n").unwrap();
        fs::write(root.join("src/notes.txt"), "not solidity\n").unwrap();
        fs::write(root.join("lib/forge-std/Test.sol"), "contract Test {}\n").unwrap();
        fs::write(root.join("node_modules/pkg/B.sol"), "contract B {}\n").unwrap();

        let files = discover_files(root, &default_scan());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["src/A.sol", "src/A.t.sol"]);
    }

    #[test]
    fn final_segment_mode_collapses_compound_suffixes() {
        let cfg = default_scan();
        assert!(matches_extension(Path::new("A.sol"), &cfg));
        assert!(matches_extension(Path::new("A.t.sol"), &cfg));
        assert!(matches_extension(Path::new("A.s.sol"), &cfg));
        // final segment is "sol" regardless of the compound part
        assert!(matches_extension(Path::new("A.x.sol"), &cfg));
        assert!(!matches_extension(Path::new("A.rs"), &cfg));
    }

    #[test]
    fn full_suffix_mode_is_strict() {
        let mut cfg = default_scan();
        cfg.match_full_suffix = true;
        cfg.extensions = vec![".t.sol".into()];
        assert!(matches_extension(Path::new("A.t.sol"), &cfg));
        assert!(!matches_extension(Path::new("A.sol"), &cfg));
        assert!(!matches_extension(Path::new("A.x.sol"), &cfg));
    }

    #[test]
    fn skip_dir_name_only_prunes_directories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        // a *file* named "lib" must not be treated as a pruned directory
        fs::write(root.join("src/lib"), "").unwrap();
        fs::write(root.join("src/C.sol"), "contract C {}\n").unwrap();

        let files = discover_files(root, &default_scan());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/C.sol"));
    }
}
