//! Unified-diff parsing and hunk application
//!
//! AI-emitted diffs are frequently imprecise: line numbers drift, file
//! headers come and go, and one stale hunk should not sink its neighbors.
//! Each hunk is therefore an independent unit of application with its own
//! success or failure, mirroring the error tolerance of search-replace
//! edits.

/// One contiguous change region parsed from a unified diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffHunk {
    /// 1-based start line in the old content (0 for pure insertions)
    pub old_start: usize,
    pub old_count: usize,
    /// 1-based start line in the new content
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<DiffLine>,
}

/// A single line within a hunk body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    Context(String),
    Added(String),
    Removed(String),
}

/// Parse the hunks out of a unified-diff string.
///
/// File headers (`--- `, `+++ `, `diff `, `index `) are tolerated and
/// skipped; `\ No newline at end of file` markers are ignored. A string
/// with no `@@` headers parses to an empty hunk list, which the engine
/// reports as an unusable diff.
pub fn parse(diff: &str) -> Vec<DiffHunk> {
    let mut hunks: Vec<DiffHunk> = Vec::new();
    let mut current: Option<DiffHunk> = None;

    for line in diff.lines() {
        if line.starts_with("@@") {
            if let Some(hunk) = current.take() {
                hunks.push(hunk);
            }
            current = parse_hunk_header(line);
            continue;
        }

        if is_file_header(line) {
            if let Some(hunk) = current.take() {
                hunks.push(hunk);
            }
            continue;
        }

        let marked =
            matches!(line.bytes().next(), Some(b'+' | b'-' | b' ' | b'\\')) || line.is_empty();
        if !marked {
            // Unmarked trailing prose ends the hunk
            if let Some(hunk) = current.take() {
                hunks.push(hunk);
            }
            continue;
        }

        let Some(hunk) = current.as_mut() else {
            continue;
        };

        if let Some(rest) = line.strip_prefix('+') {
            hunk.lines.push(DiffLine::Added(rest.to_string()));
        } else if let Some(rest) = line.strip_prefix('-') {
            hunk.lines.push(DiffLine::Removed(rest.to_string()));
        } else if let Some(rest) = line.strip_prefix(' ') {
            hunk.lines.push(DiffLine::Context(rest.to_string()));
        } else if line.is_empty() {
            // Blank context lines often arrive with the leading space stripped
            hunk.lines.push(DiffLine::Context(String::new()));
        }
        // A leading '\' is the "No newline at end of file" marker; skip it
    }

    if let Some(hunk) = current.take() {
        hunks.push(hunk);
    }

    hunks.retain(|hunk| !hunk.lines.is_empty());
    hunks
}

fn is_file_header(line: &str) -> bool {
    line.starts_with("--- ")
        || line.starts_with("+++ ")
        || line.starts_with("diff ")
        || line.starts_with("index ")
}

/// Parse an `@@ -old_start[,old_count] +new_start[,new_count] @@` header.
fn parse_hunk_header(line: &str) -> Option<DiffHunk> {
    let body = line.trim_start_matches('@').trim_end();
    let body = match body.find("@@") {
        Some(end) => &body[..end],
        None => body,
    };

    let mut old_range = None;
    let mut new_range = None;
    for token in body.split_whitespace() {
        if let Some(range) = token.strip_prefix('-') {
            old_range = parse_range(range);
        } else if let Some(range) = token.strip_prefix('+') {
            new_range = parse_range(range);
        }
    }

    let (old_start, old_count) = old_range?;
    let (new_start, new_count) = new_range?;
    Some(DiffHunk {
        old_start,
        old_count,
        new_start,
        new_count,
        lines: Vec::new(),
    })
}

/// Parse `start[,count]`; a missing count means 1.
fn parse_range(range: &str) -> Option<(usize, usize)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}

/// Apply hunks against `content`, recording a
/// `"hunk context mismatch in <path>"` error for each hunk whose expected
/// lines cannot be located. Returns the rewritten content when at least
/// one hunk applied, `None` when none did.
///
/// Hunks are tried at their stated position first (adjusted by the line
/// offset accumulated from earlier hunks), then located by scanning from
/// the top; the first match wins.
pub(crate) fn apply_to_content(
    content: &str,
    hunks: &[DiffHunk],
    path: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    let had_trailing_newline = content.ends_with('\n');
    let mut lines: Vec<String> = if content.is_empty() {
        Vec::new()
    } else {
        content.split('\n').map(str::to_string).collect()
    };
    if had_trailing_newline {
        lines.pop();
    }

    let mut offset: isize = 0;
    let mut applied = 0usize;

    for hunk in hunks {
        let expected: Vec<&str> = hunk
            .lines
            .iter()
            .filter_map(|line| match line {
                DiffLine::Context(text) | DiffLine::Removed(text) => Some(text.as_str()),
                DiffLine::Added(_) => None,
            })
            .collect();
        let replacement: Vec<String> = hunk
            .lines
            .iter()
            .filter_map(|line| match line {
                DiffLine::Context(text) | DiffLine::Added(text) => Some(text.clone()),
                DiffLine::Removed(_) => None,
            })
            .collect();

        if expected.is_empty() {
            // Pure insertion: old_start names the line the new lines follow
            let at = clamp_index(hunk.old_start as isize + offset, lines.len());
            let added = replacement.len() as isize;
            lines.splice(at..at, replacement);
            offset += added;
            applied += 1;
            continue;
        }

        let hint = clamp_index(hunk.old_start as isize - 1 + offset, lines.len());
        match find_block(&lines, &expected, hint) {
            Some(position) => {
                let delta = replacement.len() as isize - expected.len() as isize;
                lines.splice(position..position + expected.len(), replacement);
                offset += delta;
                applied += 1;
            }
            None => {
                tracing::debug!(path, old_start = hunk.old_start, "hunk did not match");
                errors.push(format!("hunk context mismatch in {}", path));
            }
        }
    }

    if applied == 0 {
        return None;
    }

    let mut output = lines.join("\n");
    if had_trailing_newline {
        output.push('\n');
    }
    Some(output)
}

fn clamp_index(index: isize, len: usize) -> usize {
    index.clamp(0, len as isize) as usize
}

/// Locate `expected` as a contiguous block in `lines`, trying `hint` first.
fn find_block(lines: &[String], expected: &[&str], hint: usize) -> Option<usize> {
    if expected.is_empty() || lines.len() < expected.len() {
        return None;
    }
    let last = lines.len() - expected.len();

    if hint <= last && block_matches(lines, expected, hint) {
        return Some(hint);
    }
    (0..=last).find(|&at| block_matches(lines, expected, at))
}

fn block_matches(lines: &[String], expected: &[&str], at: usize) -> bool {
    expected
        .iter()
        .zip(&lines[at..at + expected.len()])
        .all(|(want, have)| *want == have)
}
