//! Patchbay Core Library
//!
//! This crate provides the core of the Patchbay editing system: applying
//! AI-proposed patches to a virtual, in-memory project and keeping a
//! linear undo/redo history of every modification.
//!
//! The pieces, leaves first:
//!
//! - [`snapshot::FileSnapshot`] - the virtual file system at one instant
//! - [`patch::PatchEngine`] - pure batch application of edits with
//!   partial-failure reporting
//! - [`history::HistoryManager`] - the bounded, branch-truncating undo
//!   timeline of snapshot pairs
//! - [`protocol`] - request/response shapes for the operator's history
//!   actions
//! - [`preview`] - computed diffs of recorded changes for display
//!
//! Anything beyond these seams (HTTP routes, auth, persistence, model
//! invocation, rendering) belongs to the embedding application; the
//! `patchbay-sdk` crate offers a per-session facade over this core.

pub mod error;
pub mod history;
pub mod patch;
pub mod preview;
pub mod protocol;
pub mod snapshot;

// Re-export commonly used types
pub use error::{PatchbayError, PatchbayResult};
pub use history::{
    EntryId, HistoryConfig, HistoryEntry, HistoryEntrySummary, HistoryManager, HistorySummary,
    TimelineState,
};
pub use patch::{ApplyReport, Edit, EditBatch, PatchEngine, PatchEngineConfig};
pub use protocol::{handle_history_action, HistoryAction, HistoryRequest, HistoryResponse};
pub use snapshot::FileSnapshot;
