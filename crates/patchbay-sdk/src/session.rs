//! Per-session editing context
//!
//! One [`EditSession`] owns one operator's working files and timeline.
//! This is the orchestrator's side of the core contracts: run the engine,
//! record what changed, keep `working_files` in step with undo/redo. The
//! session itself is synchronous single-writer state; the registry wraps
//! it in a lock for concurrent embedders.

use tracing::{debug, info, warn};

use patchbay_core::preview::{snapshot_diff, FileDiff};
use patchbay_core::{
    handle_history_action, ApplyReport, EditBatch, EntryId, FileSnapshot, HistoryAction,
    HistoryConfig, HistoryEntry, HistoryEntrySummary, HistoryManager, HistoryRequest,
    HistoryResponse, PatchEngine, PatchEngineConfig, TimelineState,
};

/// Unique session identifier
pub type SessionId = String;

/// One editing session: working files, engine, and timeline
pub struct EditSession {
    id: SessionId,
    working_files: FileSnapshot,
    engine: PatchEngine,
    history: HistoryManager,
}

impl EditSession {
    /// Create a session with default engine and history configuration
    pub fn new(id: impl Into<SessionId>, initial_files: FileSnapshot) -> Self {
        Self::with_configs(
            id,
            initial_files,
            HistoryConfig::default(),
            PatchEngineConfig::default(),
        )
    }

    /// Create a session with specific configuration
    pub fn with_configs(
        id: impl Into<SessionId>,
        initial_files: FileSnapshot,
        history_config: HistoryConfig,
        engine_config: PatchEngineConfig,
    ) -> Self {
        let id = id.into();
        debug!(session = %id, files = initial_files.len(), "session created");
        Self {
            id,
            working_files: initial_files,
            engine: PatchEngine::with_config(engine_config),
            history: HistoryManager::new(history_config),
        }
    }

    /// Session identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current working snapshot
    pub fn working_files(&self) -> &FileSnapshot {
        &self.working_files
    }

    /// The session's timeline
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Apply an AI-proposed edit batch and record the result.
    ///
    /// A history entry is recorded whenever the batch changed at least one
    /// file, partial successes included; the caller surfaces
    /// `errors.len() > 0` with changed files as an "N of M applied"
    /// warning. A batch that changed nothing records nothing, so undo
    /// never steps through no-ops.
    pub fn apply_edits(&mut self, edits: EditBatch, explanation: Option<String>) -> ApplyReport {
        let report = self.engine.apply(&self.working_files, &edits);
        let changed = report.files != self.working_files;

        if changed {
            let mut entry =
                HistoryEntry::new(edits, self.working_files.clone(), report.files.clone());
            if let Some(explanation) = explanation {
                entry = entry.with_explanation(explanation);
            }
            info!(
                session = %self.id,
                entry = entry.short_id(),
                edits = entry.edit_count(),
                failures = report.errors.len(),
                "recorded edit batch"
            );
            self.history.push(entry);
            self.working_files = report.files.clone();
        }

        if !report.success {
            warn!(
                session = %self.id,
                failures = report.errors.len(),
                changed,
                "edit batch had failures"
            );
        }

        report
    }

    /// Undo the latest change, returning the restored snapshot
    pub fn undo(&mut self) -> Option<FileSnapshot> {
        let restored = self.history.undo()?.before_state.clone();
        self.working_files = restored.clone();
        Some(restored)
    }

    /// Redo the next change, returning the restored snapshot
    pub fn redo(&mut self) -> Option<FileSnapshot> {
        let restored = self.history.redo()?.after_state.clone();
        self.working_files = restored.clone();
        Some(restored)
    }

    /// Execute an operator history action, keeping the working files in
    /// step when the action moved the timeline cursor.
    pub fn handle_action(&mut self, request: &HistoryRequest) -> HistoryResponse {
        let response = handle_history_action(&mut self.history, request);

        if response.success
            && matches!(request.action, HistoryAction::Undo | HistoryAction::Redo)
        {
            if let Some(files) = &response.files {
                self.working_files = files.clone();
            }
        }

        response
    }

    /// Lightweight views of the recorded entries, oldest first
    pub fn entry_summaries(&self) -> Vec<HistoryEntrySummary> {
        self.history.entry_summaries()
    }

    /// Computed per-file diffs of one recorded entry, for display
    pub fn entry_preview(&self, id: &EntryId) -> Option<Vec<FileDiff>> {
        let entry = self.history.entry_by_id(id)?;
        Some(snapshot_diff(&entry.before_state, &entry.after_state))
    }

    /// Export the timeline for external persistence
    pub fn export_timeline(&self) -> TimelineState {
        self.history.export_state()
    }
}
