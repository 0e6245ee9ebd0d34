//! Timeline export/import
//!
//! A timeline serializes as `{ "history": [...], "currentIndex": n }` with
//! `-1` marking the pre-first-entry cursor, and restores from that exact
//! shape. Durable storage itself belongs to an external collaborator; this
//! module only guarantees the round trip.

use serde::{Deserialize, Serialize};

use super::config::HistoryConfig;
use super::manager::HistoryManager;
use super::types::HistoryEntry;
use crate::error::{PatchbayError, PatchbayResult};

/// Portable form of a history timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineState {
    pub history: Vec<HistoryEntry>,
    /// Cursor position, -1 when before the first entry
    pub current_index: i64,
}

impl HistoryManager {
    /// Export the timeline into its portable form
    pub fn export_state(&self) -> TimelineState {
        TimelineState {
            history: self.entries().to_vec(),
            current_index: self.current_index(),
        }
    }

    /// Restore a timeline from its portable form.
    ///
    /// Rejects a cursor outside `[-1, len-1]`. If the restored entry list
    /// exceeds the configured capacity, the oldest entries are evicted and
    /// the cursor shifted, exactly as a live `push` would have done.
    pub fn from_state(state: TimelineState, config: HistoryConfig) -> PatchbayResult<Self> {
        let len = state.history.len() as i64;
        if state.current_index < -1 || state.current_index >= len {
            return Err(PatchbayError::invalid_input(format!(
                "currentIndex {} out of range for {} entries",
                state.current_index, len
            )));
        }

        let cursor = usize::try_from(state.current_index).ok();
        Ok(Self::from_parts(config, state.history, cursor))
    }
}
