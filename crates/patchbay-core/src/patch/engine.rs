//! Batch application of edits to a snapshot
//!
//! The engine is a pure function of (base snapshot, edit batch): no shared
//! state, no I/O, no panics on malformed input. Every edit that cannot be
//! applied contributes a message to the error list and the batch moves on,
//! so the caller always learns exactly which edits landed.

use tracing::{debug, warn};

use super::types::{ApplyReport, Edit};
use super::unified_diff;
use super::validation;
use crate::snapshot::FileSnapshot;

/// Configuration for the patch engine
#[derive(Debug, Clone, Default)]
pub struct PatchEngineConfig {
    /// When set, a batch with any failure leaves the base snapshot
    /// completely untouched instead of keeping the edits that succeeded.
    pub all_or_nothing: bool,
}

impl PatchEngineConfig {
    /// Require the whole batch to apply or none of it
    pub fn with_all_or_nothing(mut self) -> Self {
        self.all_or_nothing = true;
        self
    }
}

/// Applies ordered edit batches to file snapshots.
///
/// Edits apply strictly in order against a working copy of the base
/// snapshot; an edit later in the batch sees the changes of earlier edits,
/// including earlier edits to the same file. Failed edits leave their
/// target file as it was and are reported, not thrown.
#[derive(Debug, Clone, Default)]
pub struct PatchEngine {
    config: PatchEngineConfig,
}

impl PatchEngine {
    /// Create an engine with default (best-effort) semantics
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with specific configuration
    pub fn with_config(config: PatchEngineConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &PatchEngineConfig {
        &self.config
    }

    /// Apply an edit batch to a base snapshot.
    ///
    /// Returns the new snapshot plus one error message per edit (or per
    /// diff hunk) that could not be applied; `success` holds exactly when
    /// no errors were recorded. Files untouched by the batch pass through
    /// unchanged.
    pub fn apply(&self, base: &FileSnapshot, edits: &[Edit]) -> ApplyReport {
        let mut working = base.clone();
        let mut errors = Vec::new();
        let mut applied = 0usize;

        for edit in edits {
            if let Err(violation) = validation::validate_edit(edit) {
                errors.push(violation);
                continue;
            }

            let before = errors.len();
            match edit {
                Edit::SearchReplace {
                    file_path,
                    search,
                    replace,
                    ..
                } => {
                    self.apply_search_replace(&mut working, file_path, search, replace, &mut errors);
                }
                Edit::UnifiedDiff {
                    file_path, diff, ..
                } => {
                    self.apply_unified_diff(&mut working, file_path, diff, &mut errors);
                }
            }
            if errors.len() == before {
                applied += 1;
            }
        }

        let success = errors.is_empty();
        if success {
            debug!(edits = edits.len(), "edit batch applied cleanly");
        } else {
            warn!(
                applied,
                total = edits.len(),
                failures = errors.len(),
                "edit batch applied with failures"
            );
        }

        if self.config.all_or_nothing && !success {
            return ApplyReport {
                success: false,
                files: base.clone(),
                errors,
            };
        }

        ApplyReport {
            success,
            files: working,
            errors,
        }
    }

    /// Replace the first literal occurrence of `search` in the target file.
    ///
    /// Only the first match is replaced: an imprecise AI-proposed search
    /// string can occur in places the model never saw, and a bounded blast
    /// radius beats replacing them all. A search string occurring in two
    /// unrelated spots is inherently ambiguous; the engine takes the first
    /// and does not attempt to disambiguate.
    fn apply_search_replace(
        &self,
        working: &mut FileSnapshot,
        file_path: &str,
        search: &str,
        replace: &str,
        errors: &mut Vec<String>,
    ) {
        let Some(content) = working.get(file_path) else {
            errors.push(format!("file not found: {}", file_path));
            return;
        };

        if !content.contains(search) {
            errors.push(format!("search string not found in {}", file_path));
            return;
        }

        let updated = content.replacen(search, replace, 1);
        working.set(file_path, updated);
    }

    /// Apply a unified diff's hunks to the target file, hunk by hunk.
    fn apply_unified_diff(
        &self,
        working: &mut FileSnapshot,
        file_path: &str,
        diff: &str,
        errors: &mut Vec<String>,
    ) {
        let Some(content) = working.get(file_path) else {
            errors.push(format!("file not found: {}", file_path));
            return;
        };

        let hunks = unified_diff::parse(diff);
        if hunks.is_empty() {
            errors.push(format!("no hunks found in diff for {}", file_path));
            return;
        }

        if let Some(updated) = unified_diff::apply_to_content(content, &hunks, file_path, errors) {
            working.set(file_path, updated);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> FileSnapshot {
        FileSnapshot::new()
            .with_file("/a.js", "let x = 1;")
            .with_file("/b.js", "function hello() {}\n")
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let engine = PatchEngine::new();
        let snapshot = base();

        let report = engine.apply(&snapshot, &[]);
        assert!(report.success);
        assert!(report.errors.is_empty());
        assert_eq!(report.files, snapshot);
    }

    #[test]
    fn test_search_replace_end_to_end() {
        let engine = PatchEngine::new();
        let report = engine.apply(
            &base(),
            &[Edit::search_replace("/a.js", "x = 1", "x = 2")],
        );

        assert!(report.success);
        assert!(report.errors.is_empty());
        assert_eq!(report.files.get("/a.js"), Some("let x = 2;"));
        // untouched files pass through
        assert_eq!(report.files.get("/b.js"), Some("function hello() {}\n"));
    }

    #[test]
    fn test_first_match_only() {
        let engine = PatchEngine::new();
        let snapshot = FileSnapshot::new().with_file("/r.txt", "ababab");

        let report = engine.apply(&snapshot, &[Edit::search_replace("/r.txt", "ab", "X")]);
        assert!(report.success);
        assert_eq!(report.files.get("/r.txt"), Some("Xabab"));
    }

    #[test]
    fn test_missing_file_reported_others_apply() {
        let engine = PatchEngine::new();
        let report = engine.apply(
            &base(),
            &[
                Edit::search_replace("/nope.js", "x", "y"),
                Edit::search_replace("/a.js", "x = 1", "x = 2"),
            ],
        );

        assert!(!report.success);
        assert_eq!(report.errors, vec!["file not found: /nope.js".to_string()]);
        assert_eq!(report.files.get("/a.js"), Some("let x = 2;"));
    }

    #[test]
    fn test_search_not_found_leaves_file_unchanged() {
        let engine = PatchEngine::new();
        let report = engine.apply(
            &base(),
            &[Edit::search_replace("/a.js", "y = 9", "y = 10")],
        );

        assert!(!report.success);
        assert_eq!(
            report.errors,
            vec!["search string not found in /a.js".to_string()]
        );
        assert_eq!(report.files.get("/a.js"), Some("let x = 1;"));
    }

    #[test]
    fn test_sequential_same_file_edits_compose() {
        let engine = PatchEngine::new();
        let snapshot = FileSnapshot::new().with_file("/s.js", "const value = alpha;");
        let forward = vec![
            Edit::search_replace("/s.js", "alpha", "beta"),
            Edit::search_replace("/s.js", "beta;", "beta; // tuned"),
        ];

        let report = engine.apply(&snapshot, &forward);
        assert!(report.success);
        assert_eq!(report.files.get("/s.js"), Some("const value = beta; // tuned"));

        // Reversed, the second search text does not exist yet
        let reversed = vec![forward[1].clone(), forward[0].clone()];
        let report = engine.apply(&snapshot, &reversed);
        assert!(!report.success);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("search string not found"));
    }

    #[test]
    fn test_invalid_edit_rejected_batch_continues() {
        let engine = PatchEngine::new();
        let report = engine.apply(
            &base(),
            &[
                Edit::search_replace("/a.js", "", "something"),
                Edit::search_replace("/a.js", "x = 1", "x = 2"),
            ],
        );

        assert!(!report.success);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("missing search"));
        assert_eq!(report.files.get("/a.js"), Some("let x = 2;"));
    }

    #[test]
    fn test_unified_diff_edit() {
        let engine = PatchEngine::new();
        let snapshot = FileSnapshot::new().with_file("/u.txt", "one\ntwo\nthree\n");
        let diff = "@@ -1,3 +1,3 @@\n one\n-two\n+2\n three\n";

        let report = engine.apply(&snapshot, &[Edit::unified_diff("/u.txt", diff)]);
        assert!(report.success);
        assert_eq!(report.files.get("/u.txt"), Some("one\n2\nthree\n"));
    }

    #[test]
    fn test_unified_diff_partial_hunks() {
        let engine = PatchEngine::new();
        let snapshot = FileSnapshot::new().with_file("/u.txt", "alpha\nbeta\n");
        let diff = "@@ -1,1 +1,1 @@\n-alpha\n+ALPHA\n@@ -9,1 +9,1 @@\n-missing\n+nope\n";

        let report = engine.apply(&snapshot, &[Edit::unified_diff("/u.txt", diff)]);
        assert!(!report.success);
        assert_eq!(
            report.errors,
            vec!["hunk context mismatch in /u.txt".to_string()]
        );
        assert_eq!(report.files.get("/u.txt"), Some("ALPHA\nbeta\n"));
    }

    #[test]
    fn test_diff_without_hunks_is_an_error() {
        let engine = PatchEngine::new();
        let report = engine.apply(
            &base(),
            &[Edit::unified_diff("/a.js", "not a diff")],
        );

        assert!(!report.success);
        assert_eq!(
            report.errors,
            vec!["no hunks found in diff for /a.js".to_string()]
        );
        assert_eq!(report.files, base());
    }

    #[test]
    fn test_edits_cannot_create_files() {
        let engine = PatchEngine::new();
        let report = engine.apply(
            &base(),
            &[Edit::unified_diff("/new.js", "@@ -0,0 +1,1 @@\n+created\n")],
        );

        assert!(!report.success);
        assert_eq!(report.errors, vec!["file not found: /new.js".to_string()]);
        assert!(!report.files.contains("/new.js"));
    }

    #[test]
    fn test_all_or_nothing_mode() {
        let engine = PatchEngine::with_config(PatchEngineConfig::default().with_all_or_nothing());
        let report = engine.apply(
            &base(),
            &[
                Edit::search_replace("/a.js", "x = 1", "x = 2"),
                Edit::search_replace("/missing.js", "x", "y"),
            ],
        );

        assert!(!report.success);
        assert_eq!(report.errors, vec!["file not found: /missing.js".to_string()]);
        // the successful first edit was rolled back with the batch
        assert_eq!(report.files, base());
    }
}
