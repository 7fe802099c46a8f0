//! Line-level diff of rendered documents.
//!
//! Uses the `similar` crate (Myers diff algorithm) over pretty-printed JSON
//! so a structural diff can be shown the way people read patches.

use std::fmt;

use serde_json::Value;
use similar::{ChangeTag, TextDiff as SimilarDiff};

/// Lines of unchanged context kept around each hunk.
const CONTEXT_LINES: usize = 3;

/// The result of diffing two rendered documents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextDiff {
    pub hunks: Vec<DiffHunk>,
}

impl TextDiff {
    /// Returns `true` if both documents rendered identically.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }

    fn lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.hunks.iter().flat_map(|h| &h.lines)
    }
}

impl fmt::Display for TextDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hunk in &self.hunks {
            writeln!(
                f,
                "@@ -{},{} +{},{} @@",
                hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
            )?;
            for line in &hunk.lines {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

/// A contiguous region of changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// 1-based line where the hunk starts in the old document.
    pub old_start: usize,
    pub old_count: usize,
    /// 1-based line where the hunk starts in the new document.
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<DiffLine>,
}

/// A single line in a diff hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    Context(String),
    Added(String),
    Removed(String),
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLine::Context(s) => write!(f, " {s}"),
            DiffLine::Added(s) => write!(f, "+{s}"),
            DiffLine::Removed(s) => write!(f, "-{s}"),
        }
    }
}

/// Compute a line-by-line diff between two texts.
pub fn diff_text(old: &str, new: &str) -> TextDiff {
    if old == new {
        return TextDiff::default();
    }

    let text_diff = SimilarDiff::from_lines(old, new);
    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(CONTEXT_LINES) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;

        let mut lines = Vec::new();
        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                lines.push(match change.tag() {
                    ChangeTag::Equal => DiffLine::Context(text),
                    ChangeTag::Delete => DiffLine::Removed(text),
                    ChangeTag::Insert => DiffLine::Added(text),
                });
            }
        }

        hunks.push(DiffHunk {
            old_start: old_range.start + 1,
            old_count: old_range.len(),
            new_start: new_range.start + 1,
            new_count: new_range.len(),
            lines,
        });
    }

    TextDiff { hunks }
}

/// Pretty-print both values and diff the result line by line.
pub fn diff_documents(old: &Value, new: &Value) -> serde_json::Result<TextDiff> {
    let old = serde_json::to_string_pretty(old)?;
    let new = serde_json::to_string_pretty(new)?;
    Ok(diff_text(&old, &new))
}
