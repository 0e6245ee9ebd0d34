//! Edit and apply-report type definitions

use serde::{Deserialize, Serialize};

use crate::snapshot::FileSnapshot;

/// A single edit instruction targeting one file.
///
/// The wire shape matches what the AI layer emits:
///
/// ```json
/// { "type": "search-replace", "filePath": "/a.js", "search": "...", "replace": "..." }
/// { "type": "unified-diff", "filePath": "/a.js", "diff": "@@ ... @@\n..." }
/// ```
///
/// The optional `context` note travels with the edit for display purposes
/// and is never interpreted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Edit {
    /// Replace the first literal, case-sensitive occurrence of `search`
    /// in the target file with `replace`.
    SearchReplace {
        #[serde(rename = "filePath")]
        file_path: String,
        search: String,
        replace: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<String>,
    },
    /// Apply a unified-diff hunk set against the target file's content.
    UnifiedDiff {
        #[serde(rename = "filePath")]
        file_path: String,
        diff: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<String>,
    },
}

impl Edit {
    /// Build a search-replace edit
    pub fn search_replace(
        file_path: impl Into<String>,
        search: impl Into<String>,
        replace: impl Into<String>,
    ) -> Self {
        Self::SearchReplace {
            file_path: file_path.into(),
            search: search.into(),
            replace: replace.into(),
            context: None,
        }
    }

    /// Build a unified-diff edit
    pub fn unified_diff(file_path: impl Into<String>, diff: impl Into<String>) -> Self {
        Self::UnifiedDiff {
            file_path: file_path.into(),
            diff: diff.into(),
            context: None,
        }
    }

    /// Target file path of this edit
    pub fn file_path(&self) -> &str {
        match self {
            Self::SearchReplace { file_path, .. } => file_path,
            Self::UnifiedDiff { file_path, .. } => file_path,
        }
    }

    /// Wire name of the edit kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SearchReplace { .. } => "search-replace",
            Self::UnifiedDiff { .. } => "unified-diff",
        }
    }
}

/// An ordered batch of edits, applied strictly in order against a
/// progressively-updated working copy. Edit N sees the result of edits
/// 1..N-1, even within the same file.
pub type EditBatch = Vec<Edit>;

/// Result of applying an edit batch to a base snapshot.
///
/// `files` always starts from a full copy of the base snapshot with the
/// successfully-applied edits layered on top; `success` holds exactly when
/// `errors` is empty. A non-empty error list with changed files means the
/// batch partially applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyReport {
    pub success: bool,
    pub files: FileSnapshot,
    pub errors: Vec<String>,
}

impl ApplyReport {
    /// Number of recorded failures
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_replace_wire_format() {
        let edit = Edit::search_replace("/a.js", "x = 1", "x = 2");
        let value = serde_json::to_value(&edit).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "search-replace",
                "filePath": "/a.js",
                "search": "x = 1",
                "replace": "x = 2",
            })
        );
    }

    #[test]
    fn test_unified_diff_wire_format_round_trip() {
        let raw = json!({
            "type": "unified-diff",
            "filePath": "/b.js",
            "diff": "@@ -1,1 +1,1 @@\n-old\n+new\n",
            "context": "swap the greeting",
        });

        let edit: Edit = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(edit.kind(), "unified-diff");
        assert_eq!(edit.file_path(), "/b.js");

        assert_eq!(serde_json::to_value(&edit).unwrap(), raw);
    }

    #[test]
    fn test_unknown_edit_type_rejected() {
        let raw = json!({
            "type": "full-file",
            "filePath": "/a.js",
            "content": "anything",
        });

        assert!(serde_json::from_value::<Edit>(raw).is_err());
    }
}
