//! Linear undo/redo timeline over history entries
//!
//! A classic linear undo stack, not a tree: pushing while a redo-able
//! future exists discards that future, which matches the "undo, then make
//! a new edit" mental model. The whole state is the entry list plus a
//! cursor; every operation here is bounded-time and non-blocking.
//!
//! The manager is a single-writer resource. All mutating operations take
//! `&mut self`; one manager belongs to one editing session, and sharing
//! across tasks is the embedder's job (see the sdk's session registry).

use tracing::{debug, info};

use super::config::HistoryConfig;
use super::types::{EntryId, HistoryEntry, HistoryEntrySummary, HistorySummary};
use crate::snapshot::FileSnapshot;

/// Ordered sequence of history entries plus the cursor marking "current".
///
/// The cursor is `None` before the first entry (nothing to undo), and
/// otherwise indexes the entry whose `after_state` is the current project
/// state.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    config: HistoryConfig,
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl HistoryManager {
    /// Create an empty timeline
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            cursor: None,
        }
    }

    /// Rebuild a timeline from restored parts. Used by timeline
    /// deserialization; enforces capacity by evicting the oldest entries.
    pub(super) fn from_parts(
        config: HistoryConfig,
        mut entries: Vec<HistoryEntry>,
        mut cursor: Option<usize>,
    ) -> Self {
        if entries.len() > config.max_entries {
            let excess = entries.len() - config.max_entries;
            entries.drain(..excess);
            cursor = cursor.and_then(|at| at.checked_sub(excess));
        }
        Self {
            config,
            entries,
            cursor,
        }
    }

    /// Record a new entry as the current one.
    ///
    /// Any redo-able future beyond the cursor is discarded, and the
    /// oldest entries are evicted once the configured capacity is
    /// exceeded. Never fails.
    pub fn push(&mut self, entry: HistoryEntry) {
        let keep = self.cursor.map_or(0, |at| at + 1);
        let discarded_future = self.entries.len() - keep;
        self.entries.truncate(keep);

        debug!(
            entry = entry.short_id(),
            discarded_future, "pushing history entry"
        );
        self.entries.push(entry);

        if self.entries.len() > self.config.max_entries {
            let excess = self.entries.len() - self.config.max_entries;
            self.entries.drain(..excess);
            debug!(evicted = excess, "history capacity reached");
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step the cursor back and return the entry that was current.
    ///
    /// The caller applies the returned entry's `before_state`. Returns
    /// `None`, with no state change, when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        let current = self.cursor?;
        self.cursor = current.checked_sub(1);

        let entry = &self.entries[current];
        info!(entry = entry.short_id(), "undo");
        Some(entry)
    }

    /// Step the cursor forward and return the entry that became current.
    ///
    /// The caller applies the returned entry's `after_state`. Returns
    /// `None`, with no state change, when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        let next = self.cursor.map_or(0, |at| at + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);

        let entry = &self.entries[next];
        info!(entry = entry.short_id(), "redo");
        Some(entry)
    }

    /// Whether an undo would return an entry
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    /// Whether a redo would return an entry
    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(!self.entries.is_empty(), |at| {
            at + 1 < self.entries.len()
        })
    }

    /// The `after_state` of the current entry, or `None` before the first
    pub fn current_state(&self) -> Option<&FileSnapshot> {
        self.cursor.map(|at| &self.entries[at].after_state)
    }

    /// The entry the cursor points at, if any
    pub fn current_entry(&self) -> Option<&HistoryEntry> {
        self.cursor.map(|at| &self.entries[at])
    }

    /// Linear lookup of an entry by ID
    pub fn entry_by_id(&self, id: &EntryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    /// All entries in timeline order
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Lightweight views of all entries in timeline order
    pub fn entry_summaries(&self) -> Vec<HistoryEntrySummary> {
        self.entries.iter().map(HistoryEntrySummary::from).collect()
    }

    /// Cursor as a signed index, -1 when before the first entry
    pub fn current_index(&self) -> i64 {
        self.cursor.map_or(-1, |at| at as i64)
    }

    /// Number of entries in the timeline
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timeline holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Derived statistics about the timeline
    pub fn summary(&self) -> HistorySummary {
        let undo_count = self.cursor.map_or(0, |at| at + 1);
        HistorySummary {
            total_entries: self.entries.len(),
            current_index: self.current_index(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_count,
            redo_count: self.entries.len() - undo_count,
        }
    }

    /// Reset to the initial state, returning how many entries were dropped
    pub fn clear(&mut self) -> usize {
        let discarded = self.entries.len();
        self.entries.clear();
        self.cursor = None;
        info!(discarded, "history cleared");
        discarded
    }

    /// Get the configuration
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Edit;

    fn entry(tag: &str) -> HistoryEntry {
        let before = FileSnapshot::new().with_file("/f.txt", format!("before {tag}"));
        let after = FileSnapshot::new().with_file("/f.txt", format!("after {tag}"));
        HistoryEntry::new(
            vec![Edit::search_replace("/f.txt", "x", "y")],
            before,
            after,
        )
        .with_explanation(tag)
    }

    fn manager_with(tags: &[&str]) -> HistoryManager {
        let mut manager = HistoryManager::default();
        for tag in tags {
            manager.push(entry(tag));
        }
        manager
    }

    #[test]
    fn test_initial_state() {
        let manager = HistoryManager::default();
        assert!(!manager.can_undo());
        assert!(!manager.can_redo());
        assert_eq!(manager.current_index(), -1);
        assert!(manager.current_state().is_none());
    }

    #[test]
    fn test_push_and_undo_redo() {
        let mut manager = manager_with(&["e1", "e2"]);
        assert_eq!(manager.current_index(), 1);

        let undone = manager.undo().unwrap();
        assert_eq!(undone.explanation.as_deref(), Some("e2"));
        assert_eq!(manager.current_index(), 0);

        let redone = manager.redo().unwrap();
        assert_eq!(redone.explanation.as_deref(), Some("e2"));
        assert_eq!(manager.current_index(), 1);
    }

    #[test]
    fn test_undo_to_before_first_entry() {
        let mut manager = manager_with(&["e1"]);

        assert!(manager.undo().is_some());
        assert_eq!(manager.current_index(), -1);
        assert!(manager.undo().is_none());
        assert!(manager.can_redo());
    }

    #[test]
    fn test_redo_from_before_first_entry() {
        let mut manager = manager_with(&["e1"]);
        manager.undo();

        let redone = manager.redo().unwrap();
        assert_eq!(redone.explanation.as_deref(), Some("e1"));
        assert_eq!(manager.current_index(), 0);
        assert!(manager.redo().is_none());
    }

    #[test]
    fn test_push_truncates_future() {
        let mut manager = manager_with(&["e1", "e2", "e3"]);
        manager.undo();
        manager.undo();
        assert_eq!(manager.current_index(), 0);

        manager.push(entry("e4"));

        assert!(manager.redo().is_none());
        let explanations: Vec<_> = manager
            .entries()
            .iter()
            .map(|e| e.explanation.clone().unwrap())
            .collect();
        assert_eq!(explanations, vec!["e1", "e4"]);
        assert_eq!(manager.current_index(), 1);
    }

    #[test]
    fn test_eviction_preserves_order_and_cursor() {
        let mut manager = HistoryManager::new(HistoryConfig::new(2));
        manager.push(entry("e1"));
        manager.push(entry("e2"));
        manager.push(entry("e3"));

        let explanations: Vec<_> = manager
            .entries()
            .iter()
            .map(|e| e.explanation.clone().unwrap())
            .collect();
        assert_eq!(explanations, vec!["e2", "e3"]);
        assert_eq!(manager.current_index(), 1);

        // undo returns e3, not the evicted e1
        let undone = manager.undo().unwrap();
        assert_eq!(undone.explanation.as_deref(), Some("e3"));
        assert_eq!(
            undone.before_state.get("/f.txt"),
            Some("before e3")
        );
    }

    #[test]
    fn test_undo_redo_round_trip_restores_cursor() {
        let mut manager = manager_with(&["e1", "e2", "e3"]);
        manager.undo();
        let before_index = manager.current_index();
        let before_id = manager.current_entry().unwrap().id.clone();

        let undone_id = manager.undo().unwrap().id.clone();
        let redone_id = manager.redo().unwrap().id.clone();

        assert_eq!(undone_id, redone_id);
        assert_eq!(redone_id, before_id);
        assert_eq!(manager.current_index(), before_index);
    }

    #[test]
    fn test_current_state_tracks_cursor() {
        let mut manager = manager_with(&["e1", "e2"]);
        assert_eq!(
            manager.current_state().unwrap().get("/f.txt"),
            Some("after e2")
        );

        manager.undo();
        assert_eq!(
            manager.current_state().unwrap().get("/f.txt"),
            Some("after e1")
        );
    }

    #[test]
    fn test_entry_by_id() {
        let manager = manager_with(&["e1", "e2"]);
        let id = manager.entries()[1].id.clone();

        assert!(manager.entry_by_id(&id).is_some());
        assert!(manager.entry_by_id(&EntryId::from_string("missing")).is_none());
    }

    #[test]
    fn test_summary_counts() {
        let mut manager = manager_with(&["e1", "e2", "e3"]);
        manager.undo();

        let summary = manager.summary();
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.current_index, 1);
        assert!(summary.can_undo);
        assert!(summary.can_redo);
        assert_eq!(summary.undo_count, 2);
        assert_eq!(summary.redo_count, 1);
    }

    #[test]
    fn test_clear_reports_discarded() {
        let mut manager = manager_with(&["e1", "e2"]);
        assert_eq!(manager.clear(), 2);
        assert!(manager.is_empty());
        assert_eq!(manager.current_index(), -1);
        assert_eq!(manager.clear(), 0);
    }
}
