//! Computed diffs for operator display
//!
//! The patch engine consumes diffs; this module produces them, turning a
//! pair of snapshots (typically a history entry's before/after states)
//! into unified-diff text an operator can read. Display only: nothing
//! here participates in patch application.

use crate::snapshot::FileSnapshot;

/// Line-based diff between two versions of one text
#[derive(Debug, Clone)]
pub struct TextDiff {
    pub hunks: Vec<PreviewHunk>,
}

/// One contiguous change region with surrounding context
#[derive(Debug, Clone)]
pub struct PreviewHunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<PreviewLine>,
}

/// A line in a computed hunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewLine {
    Context(String),
    Added(String),
    Removed(String),
}

/// Context lines kept on either side of a change
const CONTEXT_LINES: usize = 3;

impl TextDiff {
    /// Compute the line diff between two strings
    pub fn compute(old: &str, new: &str) -> Self {
        let old_lines: Vec<&str> = old.lines().collect();
        let new_lines: Vec<&str> = new.lines().collect();
        let ops = diff_ops(&old_lines, &new_lines);
        Self {
            hunks: group_into_hunks(&ops),
        }
    }

    /// Format as unified diff text
    pub fn format_unified(&self) -> String {
        let mut output = String::new();

        for hunk in &self.hunks {
            output.push_str(&format!(
                "@@ -{},{} +{},{} @@\n",
                hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
            ));
            for line in &hunk.lines {
                match line {
                    PreviewLine::Context(text) => output.push_str(&format!(" {}\n", text)),
                    PreviewLine::Added(text) => output.push_str(&format!("+{}\n", text)),
                    PreviewLine::Removed(text) => output.push_str(&format!("-{}\n", text)),
                }
            }
        }

        output
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        !self.hunks.is_empty()
    }

    /// Count added lines
    pub fn added_count(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|hunk| &hunk.lines)
            .filter(|line| matches!(line, PreviewLine::Added(_)))
            .count()
    }

    /// Count removed lines
    pub fn removed_count(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|hunk| &hunk.lines)
            .filter(|line| matches!(line, PreviewLine::Removed(_)))
            .count()
    }
}

/// LCS-aligned edit script between two line slices.
fn diff_ops(old: &[&str], new: &[&str]) -> Vec<PreviewLine> {
    // lcs[i][j] = longest common subsequence length of old[i..] and new[j..]
    let mut lcs = vec![vec![0usize; new.len() + 1]; old.len() + 1];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            ops.push(PreviewLine::Context(old[i].to_string()));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(PreviewLine::Removed(old[i].to_string()));
            i += 1;
        } else {
            ops.push(PreviewLine::Added(new[j].to_string()));
            j += 1;
        }
    }
    for line in &old[i..] {
        ops.push(PreviewLine::Removed(line.to_string()));
    }
    for line in &new[j..] {
        ops.push(PreviewLine::Added(line.to_string()));
    }
    ops
}

/// Cluster change ops into hunks, keeping [`CONTEXT_LINES`] of context and
/// merging clusters whose context would overlap.
fn group_into_hunks(ops: &[PreviewLine]) -> Vec<PreviewHunk> {
    let changed: Vec<usize> = ops
        .iter()
        .enumerate()
        .filter(|(_, op)| !matches!(op, PreviewLine::Context(_)))
        .map(|(index, _)| index)
        .collect();
    if changed.is_empty() {
        return Vec::new();
    }

    let mut clusters: Vec<(usize, usize)> = Vec::new();
    for &index in &changed {
        let start = index.saturating_sub(CONTEXT_LINES);
        let end = (index + CONTEXT_LINES).min(ops.len() - 1);
        match clusters.last_mut() {
            Some((_, last_end)) if start <= *last_end + 1 => *last_end = (*last_end).max(end),
            _ => clusters.push((start, end)),
        }
    }

    // 1-based line numbers at each op position
    let mut old_no = Vec::with_capacity(ops.len());
    let mut new_no = Vec::with_capacity(ops.len());
    let (mut o, mut n) = (0usize, 0usize);
    for op in ops {
        old_no.push(o + 1);
        new_no.push(n + 1);
        match op {
            PreviewLine::Context(_) => {
                o += 1;
                n += 1;
            }
            PreviewLine::Removed(_) => o += 1,
            PreviewLine::Added(_) => n += 1,
        }
    }

    clusters
        .into_iter()
        .map(|(start, end)| {
            let lines: Vec<PreviewLine> = ops[start..=end].to_vec();
            let old_count = lines
                .iter()
                .filter(|l| matches!(l, PreviewLine::Context(_) | PreviewLine::Removed(_)))
                .count();
            let new_count = lines
                .iter()
                .filter(|l| matches!(l, PreviewLine::Context(_) | PreviewLine::Added(_)))
                .count();
            PreviewHunk {
                old_start: if old_count == 0 {
                    old_no[start].saturating_sub(1)
                } else {
                    old_no[start]
                },
                old_count,
                new_start: new_no[start],
                new_count,
                lines,
            }
        })
        .collect()
}

/// Per-file diff between two snapshots
#[derive(Debug, Clone)]
pub struct FileDiff {
    pub path: String,
    pub diff: TextDiff,
}

/// Diff every file that differs between two snapshots, sorted by path.
///
/// A path present on only one side diffs against empty text; patch mode
/// never creates or deletes files, but snapshots recorded by a full-file
/// generation pass can.
pub fn snapshot_diff(before: &FileSnapshot, after: &FileSnapshot) -> Vec<FileDiff> {
    let mut paths: Vec<&str> = before.paths().chain(after.paths()).collect();
    paths.sort_unstable();
    paths.dedup();

    paths
        .into_iter()
        .filter_map(|path| {
            let old = before.get(path).unwrap_or("");
            let new = after.get(path).unwrap_or("");
            if old == new {
                return None;
            }
            Some(FileDiff {
                path: path.to_string(),
                diff: TextDiff::compute(old, new),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_changes() {
        let diff = TextDiff::compute("a\nb\n", "a\nb\n");
        assert!(!diff.has_changes());
        assert_eq!(diff.format_unified(), "");
    }

    #[test]
    fn test_single_line_change() {
        let diff = TextDiff::compute("a\nb\nc\n", "a\nB\nc\n");
        assert!(diff.has_changes());
        assert_eq!(diff.added_count(), 1);
        assert_eq!(diff.removed_count(), 1);

        let text = diff.format_unified();
        assert!(text.contains("-b\n"));
        assert!(text.contains("+B\n"));
        assert!(text.starts_with("@@ -1,3 +1,3 @@\n"));
    }

    #[test]
    fn test_distant_changes_become_separate_hunks() {
        let old: String = (1..=20).map(|i| format!("line {i}\n")).collect();
        let new = old.replace("line 2\n", "LINE 2\n").replace("line 19\n", "LINE 19\n");

        let diff = TextDiff::compute(&old, &new);
        assert_eq!(diff.hunks.len(), 2);
    }

    #[test]
    fn test_lcs_keeps_common_middle() {
        let diff = TextDiff::compute("x\nkeep\ny\n", "z\nkeep\nw\n");
        let context_count = diff.hunks[0]
            .lines
            .iter()
            .filter(|l| matches!(l, PreviewLine::Context(_)))
            .count();
        assert!(context_count >= 1);
    }

    #[test]
    fn test_round_trips_through_engine_parser() {
        // A computed diff must be consumable by the application side
        let old = "one\ntwo\nthree\n";
        let new = "one\n2\nthree\n";
        let rendered = TextDiff::compute(old, new).format_unified();

        let hunks = crate::patch::unified_diff::parse(&rendered);
        let mut errors = Vec::new();
        let applied =
            crate::patch::unified_diff::apply_to_content(old, &hunks, "/p.txt", &mut errors)
                .unwrap();
        assert_eq!(applied, new);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_snapshot_diff_sorted_and_filtered() {
        let before = FileSnapshot::new()
            .with_file("/b.js", "same\n")
            .with_file("/a.js", "old\n");
        let after = FileSnapshot::new()
            .with_file("/b.js", "same\n")
            .with_file("/a.js", "new\n")
            .with_file("/c.js", "created\n");

        let diffs = snapshot_diff(&before, &after);
        let paths: Vec<&str> = diffs.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["/a.js", "/c.js"]);
        assert_eq!(diffs[1].diff.added_count(), 1);
        assert_eq!(diffs[1].diff.removed_count(), 0);
    }
}
