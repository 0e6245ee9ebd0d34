//! History action protocol
//!
//! Request/response shapes for the thin route layer that drives the
//! timeline on an operator's behalf. Actions that do not apply in the
//! current state ("Nothing to undo") come back as unsuccessful responses
//! with a message, never as errors of [`crate::error::PatchbayError`]; the
//! route layer forwards them verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::{EntryId, HistoryEntry, HistoryManager, HistorySummary};
use crate::snapshot::FileSnapshot;

/// Operator action against a session's timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Undo,
    Redo,
    Get,
    Clear,
    Summary,
}

/// A history action request as received from the route layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    pub action: HistoryAction,
    /// Required for `get`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
}

impl HistoryRequest {
    /// Build a request without an entry ID
    pub fn action(action: HistoryAction) -> Self {
        Self {
            action,
            entry_id: None,
        }
    }

    /// Build a `get` request for a specific entry
    pub fn get(entry_id: impl Into<String>) -> Self {
        Self {
            action: HistoryAction::Get,
            entry_id: Some(entry_id.into()),
        }
    }
}

/// Entry metadata carried in responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMeta {
    pub id: EntryId,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl From<&HistoryEntry> for EntryMeta {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            timestamp: entry.timestamp,
            explanation: entry.explanation.clone(),
        }
    }
}

/// Response to a history action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The snapshot the caller should display: `beforeState` for undo,
    /// `afterState` for redo and get
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FileSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<HistorySummary>,
    /// Entries discarded by a `clear`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleared: Option<usize>,
}

impl HistoryResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            files: None,
            entry: None,
            summary: None,
            cleared: None,
        }
    }

    fn with_files(entry: &HistoryEntry, files: FileSnapshot) -> Self {
        Self {
            success: true,
            error: None,
            files: Some(files),
            entry: Some(EntryMeta::from(entry)),
            summary: None,
            cleared: None,
        }
    }
}

/// Execute one history action against a timeline.
///
/// Undo and redo return the snapshot the caller should apply; the caller
/// owns pushing that snapshot back into its working state.
pub fn handle_history_action(
    history: &mut HistoryManager,
    request: &HistoryRequest,
) -> HistoryResponse {
    match request.action {
        HistoryAction::Undo => match history.undo() {
            Some(entry) => HistoryResponse::with_files(entry, entry.before_state.clone()),
            None => HistoryResponse::failure("Nothing to undo"),
        },
        HistoryAction::Redo => match history.redo() {
            Some(entry) => HistoryResponse::with_files(entry, entry.after_state.clone()),
            None => HistoryResponse::failure("Nothing to redo"),
        },
        HistoryAction::Get => {
            let Some(raw_id) = request.entry_id.as_deref() else {
                return HistoryResponse::failure("entryId required for get action");
            };
            let id = EntryId::from_string(raw_id);
            match history.entry_by_id(&id) {
                Some(entry) => HistoryResponse::with_files(entry, entry.after_state.clone()),
                None => HistoryResponse::failure("Entry not found"),
            }
        }
        HistoryAction::Clear => {
            let cleared = history.clear();
            HistoryResponse {
                success: true,
                error: None,
                files: None,
                entry: None,
                summary: None,
                cleared: Some(cleared),
            }
        }
        HistoryAction::Summary => HistoryResponse {
            success: true,
            error: None,
            files: None,
            entry: None,
            summary: Some(history.summary()),
            cleared: None,
        },
    }
}
