//! Classified issue loading.
//!
//! Two layouts are accepted, chosen by file extension:
//! - `.jsonl` / `.ndjson`: one issue object per line, blank lines ignored
//! - anything else: a document `{ "issues": [ ... ] }`
//!
//! Line-oriented files fail on the first malformed record, reporting its
//! line number. Records are never skipped or partially filled.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use triage_models::ClassifiedIssue;

use crate::atomic::{read_json, read_to_string};
use crate::error::{PersistenceError, Result};

/// On-disk shape of a whole-document issue file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssueDocument {
    pub issues: Vec<ClassifiedIssue>,
}

/// Layout of an issue file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueFormat {
    Document,
    JsonLines,
}

impl IssueFormat {
    /// Picks the layout from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext)
                if ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson") =>
            {
                IssueFormat::JsonLines
            }
            _ => IssueFormat::Document,
        }
    }
}

/// Reads all classified issues from `path`.
pub fn read_issues(path: &Path) -> Result<Vec<ClassifiedIssue>> {
    let format = IssueFormat::from_path(path);
    let issues = match format {
        IssueFormat::Document => read_json::<IssueDocument>(path)?.issues,
        IssueFormat::JsonLines => parse_lines(path, &read_to_string(path)?)?,
    };

    debug!(
        path = %path.display(),
        format = ?format,
        issues = issues.len(),
        "Loaded issues"
    );
    Ok(issues)
}

fn parse_lines(path: &Path, data: &str) -> Result<Vec<ClassifiedIssue>> {
    data.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| PersistenceError::MalformedRecord {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use triage_models::IssuePriority;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(IssueFormat::from_path(Path::new("a.jsonl")), IssueFormat::JsonLines);
        assert_eq!(IssueFormat::from_path(Path::new("a.NDJSON")), IssueFormat::JsonLines);
        assert_eq!(IssueFormat::from_path(Path::new("a.json")), IssueFormat::Document);
        assert_eq!(IssueFormat::from_path(Path::new("issues")), IssueFormat::Document);
    }

    #[test]
    fn test_read_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("issues.json");
        fs::write(
            &path,
            r#"{"issues": [
                {"id": "1", "title": "Disk full", "category": "Storage_Team", "priority": "P2"},
                {"id": "2", "category": "Voice_Team"}
            ]}"#,
        )
        .unwrap();

        let issues = read_issues(&path).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].title, "Disk full");
        assert_eq!(issues[0].priority, IssuePriority::P2);
        assert_eq!(issues[1].category, "Voice_Team");
    }

    #[test]
    fn test_read_lines_skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("issues.jsonl");
        fs::write(
            &path,
            "{\"id\": \"1\", \"category\": \"Data_Team\"}\n\n{\"id\": \"2\", \"category\": \"\"}\n",
        )
        .unwrap();

        let issues = read_issues(&path).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[1].category, "");
    }

    #[test]
    fn test_malformed_line_fails_with_line_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("issues.jsonl");
        fs::write(
            &path,
            "{\"id\": \"1\", \"category\": \"Data_Team\"}\n\n{\"id\": \"2\"}\n",
        )
        .unwrap();

        match read_issues(&path) {
            Err(PersistenceError::MalformedRecord { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed record, got {:?}", other),
        }
    }
}
