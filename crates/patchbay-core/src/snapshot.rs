//! Virtual file-system snapshots
//!
//! A [`FileSnapshot`] is the complete state of a virtual project at one
//! instant: a mapping from absolute-style path (`/`-prefixed) to full text
//! content. Snapshots are immutable by convention; every modification
//! produces a new snapshot, which is what makes before/after history
//! entries cheap to reason about.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete path → content mapping for a virtual project.
///
/// A path absent from the snapshot denotes a file that does not exist at
/// that point in history. This is distinct from a present path mapping to
/// an empty string (an existing, empty file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileSnapshot {
    files: HashMap<String, String>,
}

impl FileSnapshot {
    /// Create an empty snapshot (a project with no files)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Get a file's content, or `None` if the file does not exist
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Check whether a file exists in this snapshot
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Number of files in the snapshot
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the snapshot holds no files at all
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over (path, content) pairs (no ordering guarantee)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    /// Iterate over the file paths (no ordering guarantee)
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Replace a file's content in this working copy.
    ///
    /// Only the patch engine mutates snapshots, and only on its private
    /// working clone; callers outside the crate see finished snapshots.
    pub(crate) fn set(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl From<HashMap<String, String>> for FileSnapshot {
    fn from(files: HashMap<String, String>) -> Self {
        Self { files }
    }
}

impl FromIterator<(String, String)> for FileSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_builder() {
        let snapshot = FileSnapshot::new()
            .with_file("/src/main.js", "console.log('hi');\n")
            .with_file("/README.md", "# Demo\n");

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("/src/main.js"), Some("console.log('hi');\n"));
        assert!(snapshot.contains("/README.md"));
    }

    #[test]
    fn test_absence_is_not_empty_content() {
        let snapshot = FileSnapshot::new().with_file("/empty.txt", "");

        assert_eq!(snapshot.get("/empty.txt"), Some(""));
        assert!(snapshot.contains("/empty.txt"));
        assert!(!snapshot.contains("/missing.txt"));
        assert_eq!(snapshot.get("/missing.txt"), None);
    }

    #[test]
    fn test_serde_transparent_map() {
        let snapshot = FileSnapshot::new().with_file("/a.js", "let x = 1;");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json, serde_json::json!({"/a.js": "let x = 1;"}));

        let back: FileSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
