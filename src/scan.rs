use crate::config::ScanConfig;
use crate::discover::discover_files;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static IMPORT_PLAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*import\s+["'][^"']+["']\s*;"#).unwrap());
static MODIFIER_INLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*modifier\s+(\w+)\s*\([^)]*\)\s*\{\s*(?:require|assert)\s*\(").unwrap()
});

/// A single lint finding, tagged by kind.
///
/// `line` is 1-indexed into the file as read; `content` is the trimmed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Issue {
    PlainImport { line: usize, content: String },
    InlineModifier { line: usize, content: String },
}

impl Issue {
    pub fn line(&self) -> usize {
        match self {
            Issue::PlainImport { line, .. } | Issue::InlineModifier { line, .. } => *line,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Issue::PlainImport { content, .. } | Issue::InlineModifier { content, .. } => content,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Issue::PlainImport { .. } => "plain_import",
            Issue::InlineModifier { .. } => "inline_modifier",
        }
    }
}

/// All findings for one file, in line order.
#[derive(Debug, Clone, Serialize)]
pub struct FileIssues {
    pub file: PathBuf,
    pub issues: Vec<Issue>,
}

/// Aggregate of one scan pass. Files with no findings appear only in the
/// `scanned` count.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub scanned: usize,
    pub entries: Vec<FileIssues>,
}

impl ScanResult {
    pub fn total_issues(&self) -> usize {
        self.entries.iter().map(|e| e.issues.len()).sum()
    }
}

/// Classify every line of `content` against both lint rules.
///
/// Rules are line-local: an import or modifier split across lines is not
/// detected. This is a known limitation, kept to match the pattern grammar.
pub fn scan_lines(content: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (idx, raw) in content.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if IMPORT_PLAIN_RE.is_match(line) {
            issues.push(Issue::PlainImport {
                line: idx + 1,
                content: line.trim().to_string(),
            });
        }
        if MODIFIER_INLINE_RE.is_match(line) {
            issues.push(Issue::InlineModifier {
                line: idx + 1,
                content: line.trim().to_string(),
            });
        }
    }
    issues
}

pub fn scan_file(path: &Path) -> Result<Vec<Issue>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(scan_lines(&content))
}

/// Discover and classify every candidate file under `root`.
///
/// A file that cannot be read is logged and contributes no findings; the
/// remaining files are still scanned. Nothing on disk is modified.
pub fn scan_tree(root: &Path, config: &ScanConfig) -> ScanResult {
    let files = discover_files(root, config);
    let scanned = files.len();
    let mut entries = Vec::new();
    for file in files {
        let issues = match scan_file(&file) {
            Ok(issues) => issues,
            Err(err) => {
                tracing::warn!("{:#}", err);
                continue;
            }
        };
        if !issues.is_empty() {
            entries.push(FileIssues { file, issues });
        }
    }
    ScanResult { scanned, entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_plain_import_with_either_quote_style() {
        let src = "pragma solidity ^0.8.0;\nimport \"forge-std/Test.sol\";\nimport 'a/B.sol';\n";
        let issues = scan_lines(src);
        assert_eq!(
            issues,
            vec![
                Issue::PlainImport {
                    line: 2,
                    content: "import \"forge-std/Test.sol\";".into()
                },
                Issue::PlainImport {
                    line: 3,
                    content: "import 'a/B.sol';".into()
                },
            ]
        );
    }

    #[test]
    fn normalized_import_forms_are_not_flagged() {
        let src = concat!(
            "import {Foo} from \"x.sol\";\n",
            "import * as Foo from \"x.sol\";\n",
            "import \"x.sol\" as Foo;\n",
        );
        assert!(scan_lines(src).is_empty());
    }

    #[test]
    fn flags_single_line_inline_modifier() {
        let src = "    modifier onlyOwner() { require(msg.sender == owner); _; }\n";
        let issues = scan_lines(src);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].label(), "inline_modifier");
        assert_eq!(issues[0].line(), 1);
    }

    #[test]
    fn assert_based_inline_modifier_is_flagged() {
        let src = "modifier checked(uint x) { assert(x > 0); _; }\n";
        assert_eq!(scan_lines(src).len(), 1);
    }

    #[test]
    fn multi_line_modifier_body_is_not_flagged() {
        let src = "modifier onlyOwner() {\n    require(msg.sender == owner);\n    _;\n}\n";
        assert!(scan_lines(src).is_empty());
    }

    #[test]
    fn modifier_with_other_first_statement_is_not_flagged() {
        let src = "modifier logged() { emit Log(); _; }\n";
        assert!(scan_lines(src).is_empty());
    }

    #[test]
    fn indented_import_is_flagged_with_trimmed_content() {
        let issues = scan_lines("  import \"a/B.sol\";  \n");
        assert_eq!(
            issues,
            vec![Issue::PlainImport {
                line: 1,
                content: "import \"a/B.sol\";".into()
            }]
        );
    }

    #[test]
    fn crlf_lines_are_handled() {
        let issues = scan_lines("import \"a/B.sol\";\r\ncontract C {}\r\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].content(), "import \"a/B.sol\";");
    }

    #[test]
    fn scanning_is_idempotent() {
        let src = "import \"a/B.sol\";\nmodifier m() { require(true); _; }\n";
        assert_eq!(scan_lines(src), scan_lines(src));
    }

    #[test]
    fn issue_serializes_with_snake_case_tag() {
        let issue = Issue::PlainImport {
            line: 3,
            content: "import \"x.sol\";".into(),
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "plain_import");
        assert_eq!(json["line"], 3);
        assert_eq!(json["content"], "import \"x.sol\";");
    }
}
