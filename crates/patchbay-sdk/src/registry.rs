//! Per-session registry
//!
//! Exactly one timeline exists per editing session. A process-wide
//! timeline shared across operators corrupts everyone's undo stack the
//! moment two sessions interleave, so the registry keys sessions by ID,
//! constructs them lazily from the snapshot source, and hands out
//! lock-guarded handles that serialize all mutation per session.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use patchbay_core::{HistoryConfig, PatchEngineConfig, PatchbayResult};

use crate::session::{EditSession, SessionId};
use crate::source::SnapshotSource;

/// Shared handle to one session's state
pub type SessionHandle = Arc<Mutex<EditSession>>;

/// Owns every live editing session in the process
pub struct SessionRegistry {
    source: Arc<dyn SnapshotSource>,
    history_config: HistoryConfig,
    engine_config: PatchEngineConfig,
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
}

impl SessionRegistry {
    /// Create a registry backed by the given snapshot source
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self {
            source,
            history_config: HistoryConfig::default(),
            engine_config: PatchEngineConfig::default(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Set the history configuration used for new sessions
    pub fn with_history_config(mut self, config: HistoryConfig) -> Self {
        self.history_config = config;
        self
    }

    /// Set the engine configuration used for new sessions
    pub fn with_engine_config(mut self, config: PatchEngineConfig) -> Self {
        self.engine_config = config;
        self
    }

    /// Get the session for an ID, creating it from the snapshot source on
    /// first use.
    pub async fn session(&self, id: &str) -> PatchbayResult<SessionHandle> {
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(id) {
                debug!(session = id, "session cache hit");
                return Ok(handle.clone());
            }
        }

        // Load outside the write lock; a racing creator may win below.
        let initial_files = self.source.load(id).await?;

        let mut sessions = self.sessions.write().await;
        let handle = sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                info!(session = id, files = initial_files.len(), "session created");
                Arc::new(Mutex::new(EditSession::with_configs(
                    id,
                    initial_files,
                    self.history_config.clone(),
                    self.engine_config.clone(),
                )))
            })
            .clone();
        Ok(handle)
    }

    /// Drop a session's state. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            info!(session = id, "session removed");
        }
        removed
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no sessions are live
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
