//! Undo/redo history of project snapshots
//!
//! Every applied edit batch becomes an immutable [`HistoryEntry`] holding
//! the full before/after snapshots; the [`HistoryManager`] keeps those
//! entries on a single linear timeline with a cursor, a capacity bound,
//! and branch-truncating pushes. The timeline round-trips through
//! [`TimelineState`] for callers that persist it elsewhere.

mod config;
mod manager;
mod serialize;
mod types;

pub use config::HistoryConfig;
pub use manager::HistoryManager;
pub use serialize::TimelineState;
pub use types::{EntryId, HistoryEntry, HistoryEntrySummary, HistorySummary};
