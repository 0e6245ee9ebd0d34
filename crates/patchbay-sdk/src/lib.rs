//! Patchbay SDK
//!
//! This crate is the embedding facade over `patchbay-core`: it owns the
//! orchestrator side of the core's call contracts so a route layer only
//! has to forward requests.
//!
//! - [`EditSession`] - one operator's working files plus timeline, with
//!   `apply → record → return files` and history-action handling built in
//! - [`SessionRegistry`] - lazy per-session construction keyed by session
//!   ID, each session guarded by its own lock
//! - [`SnapshotSource`] - the seam to whatever loads initial project files
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use patchbay_core::{Edit, FileSnapshot};
//! use patchbay_sdk::{MemorySnapshotSource, SessionRegistry};
//!
//! let source = MemorySnapshotSource::new(
//!     FileSnapshot::new().with_file("/a.js", "let x = 1;"),
//! );
//! let registry = SessionRegistry::new(Arc::new(source));
//!
//! let handle = registry.session("operator-1").await?;
//! let mut session = handle.lock().await;
//! let report = session.apply_edits(
//!     vec![Edit::search_replace("/a.js", "x = 1", "x = 2")],
//!     Some("bump x".into()),
//! );
//! assert!(report.success);
//! ```

pub mod registry;
pub mod session;
pub mod source;

pub use registry::{SessionHandle, SessionRegistry};
pub use session::{EditSession, SessionId};
pub use source::{MemorySnapshotSource, SnapshotSource};

// Re-export commonly used types from core
pub use patchbay_core::{
    ApplyReport, Edit, EditBatch, FileSnapshot, HistoryAction, HistoryConfig, HistoryEntry,
    HistoryManager, HistoryRequest, HistoryResponse, PatchEngine, PatchEngineConfig,
    PatchbayError, PatchbayResult,
};
