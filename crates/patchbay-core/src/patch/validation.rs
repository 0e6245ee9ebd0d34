//! Boundary validation for edit records
//!
//! A malformed edit is rejected before application and never reaches the
//! matching algorithms; the resulting message names the file path and the
//! missing field(s) so the caller can explain the rejection.

use super::types::Edit;

/// Validate a single edit's shape.
///
/// Returns the rejection message for an invalid edit. Emptiness is the
/// only shape concern at this boundary: an empty `search` would match
/// everywhere, an empty `replace` or `diff` carries no change.
pub fn validate_edit(edit: &Edit) -> Result<(), String> {
    match edit {
        Edit::SearchReplace {
            file_path,
            search,
            replace,
            ..
        } => {
            let mut missing = Vec::new();
            if search.is_empty() {
                missing.push("search");
            }
            if replace.is_empty() {
                missing.push("replace");
            }
            if missing.is_empty() {
                Ok(())
            } else {
                Err(format!(
                    "invalid search-replace edit for {}: missing {}",
                    file_path,
                    missing.join(" and ")
                ))
            }
        }
        Edit::UnifiedDiff {
            file_path, diff, ..
        } => {
            if diff.is_empty() {
                Err(format!(
                    "invalid unified-diff edit for {}: missing diff",
                    file_path
                ))
            } else {
                Ok(())
            }
        }
    }
}

/// Validate a whole batch, collecting one message per invalid edit.
pub fn validate_batch(edits: &[Edit]) -> Vec<String> {
    edits
        .iter()
        .filter_map(|edit| validate_edit(edit).err())
        .collect()
}
