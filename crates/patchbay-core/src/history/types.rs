//! History entry type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::patch::EditBatch;
use crate::snapshot::FileSnapshot;

/// Unique identifier for a history entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl EntryId {
    /// Create a new random entry ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Create from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One recorded modification of the virtual project: the edit batch that
/// caused it plus the complete snapshots on either side.
///
/// Entries are immutable once created; undo and redo hand back the
/// `before_state`/`after_state` without recomputing anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique identifier
    pub id: EntryId,

    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,

    /// Optional human-readable summary of the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// The edits that produced this change
    pub edits: EditBatch,

    /// Project state before the batch applied
    pub before_state: FileSnapshot,

    /// Project state after the batch applied
    pub after_state: FileSnapshot,
}

impl HistoryEntry {
    /// Create a new entry for an applied batch
    pub fn new(edits: EditBatch, before_state: FileSnapshot, after_state: FileSnapshot) -> Self {
        Self {
            id: EntryId::new(),
            timestamp: Utc::now(),
            explanation: None,
            edits,
            before_state,
            after_state,
        }
    }

    /// Set the explanation
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Get short ID (first 8 characters)
    pub fn short_id(&self) -> &str {
        &self.id.0[..8.min(self.id.0.len())]
    }

    /// Number of edits in the recorded batch
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Distinct file paths targeted by the batch, sorted
    pub fn touched_paths(&self) -> Vec<String> {
        let paths: BTreeSet<&str> = self.edits.iter().map(|edit| edit.file_path()).collect();
        paths.into_iter().map(str::to_string).collect()
    }
}

/// Lightweight view of an entry for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntrySummary {
    pub id: EntryId,
    pub timestamp: DateTime<Utc>,
    pub explanation: Option<String>,
    pub edit_count: usize,
    pub touched_paths: Vec<String>,
}

impl From<&HistoryEntry> for HistoryEntrySummary {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            timestamp: entry.timestamp,
            explanation: entry.explanation.clone(),
            edit_count: entry.edit_count(),
            touched_paths: entry.touched_paths(),
        }
    }
}

/// Derived statistics about a timeline's current position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total_entries: usize,
    /// Cursor position, -1 when before the first entry
    pub current_index: i64,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Entries reachable by undoing (cursor position + 1)
    pub undo_count: usize,
    /// Entries reachable by redoing
    pub redo_count: usize,
}
