//! Snapshot source seam
//!
//! Loading the initial project files (boilerplate, templates, persisted
//! state) is an external collaborator's job. The registry only needs one
//! async call; embedders implement it against whatever storage they have.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use patchbay_core::{FileSnapshot, PatchbayResult};

/// Provider of initial project snapshots for new sessions
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Load the starting snapshot for a session
    async fn load(&self, session_id: &str) -> PatchbayResult<FileSnapshot>;
}

/// In-memory snapshot source: a shared boilerplate plus optional
/// per-session overrides. Suitable for tests and single-process embedders.
pub struct MemorySnapshotSource {
    boilerplate: FileSnapshot,
    overrides: RwLock<HashMap<String, FileSnapshot>>,
}

impl MemorySnapshotSource {
    /// Create a source that hands every session the given boilerplate
    pub fn new(boilerplate: FileSnapshot) -> Self {
        Self {
            boilerplate,
            overrides: RwLock::new(HashMap::new()),
        }
    }

    /// Set the starting snapshot for one specific session
    pub async fn set(&self, session_id: impl Into<String>, snapshot: FileSnapshot) {
        let mut overrides = self.overrides.write().await;
        overrides.insert(session_id.into(), snapshot);
    }
}

impl Default for MemorySnapshotSource {
    fn default() -> Self {
        Self::new(FileSnapshot::new())
    }
}

#[async_trait]
impl SnapshotSource for MemorySnapshotSource {
    async fn load(&self, session_id: &str) -> PatchbayResult<FileSnapshot> {
        let overrides = self.overrides.read().await;
        Ok(overrides
            .get(session_id)
            .cloned()
            .unwrap_or_else(|| self.boilerplate.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_boilerplate_for_unknown_session() {
        let source =
            MemorySnapshotSource::new(FileSnapshot::new().with_file("/index.html", "<html>"));

        let snapshot = source.load("anyone").await.unwrap();
        assert_eq!(snapshot.get("/index.html"), Some("<html>"));
    }

    #[tokio::test]
    async fn test_override_wins() {
        let source =
            MemorySnapshotSource::new(FileSnapshot::new().with_file("/index.html", "<html>"));
        source
            .set("special", FileSnapshot::new().with_file("/app.js", "app"))
            .await;

        let snapshot = source.load("special").await.unwrap();
        assert!(snapshot.contains("/app.js"));
        assert!(!snapshot.contains("/index.html"));
    }
}
