//! Change records produced by the structural differ.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tagbox_types::PathStep;

/// Classification of a change record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// A key present only on the right-hand side.
    New,
    /// A key present only on the left-hand side.
    Deleted,
    /// A value that differs between both sides.
    Edited,
    /// An element appended to or dropped from an array.
    ArrayChange,
}

impl ChangeKind {
    /// One-letter code used in the serialized form.
    pub fn code(self) -> &'static str {
        match self {
            Self::New => "N",
            Self::Deleted => "D",
            Self::Edited => "E",
            Self::ArrayChange => "A",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single change between two trees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ChangeRecord {
    #[serde(rename = "N")]
    New { path: Vec<PathStep>, rhs: Value },
    #[serde(rename = "D")]
    Deleted { path: Vec<PathStep>, lhs: Value },
    #[serde(rename = "E")]
    Edited {
        path: Vec<PathStep>,
        lhs: Value,
        rhs: Value,
    },
    /// `path` points at the array; `index` at the element that changed.
    #[serde(rename = "A")]
    Array {
        path: Vec<PathStep>,
        index: usize,
        item: ArrayItem,
    },
}

impl ChangeRecord {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::New { .. } => ChangeKind::New,
            Self::Deleted { .. } => ChangeKind::Deleted,
            Self::Edited { .. } => ChangeKind::Edited,
            Self::Array { .. } => ChangeKind::ArrayChange,
        }
    }

    pub fn path(&self) -> &[PathStep] {
        match self {
            Self::New { path, .. }
            | Self::Deleted { path, .. }
            | Self::Edited { path, .. }
            | Self::Array { path, .. } => path,
        }
    }

    /// Dotted form of the path (array records include the element index).
    pub fn dotted_path(&self) -> String {
        let mut parts: Vec<String> = self.path().iter().map(PathStep::as_segment).collect();
        if let Self::Array { index, .. } = self {
            parts.push(index.to_string());
        }
        parts.join(".")
    }

    pub fn is_deletion(&self) -> bool {
        self.kind() == ChangeKind::Deleted
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.dotted_path();
        match self {
            Self::New { rhs, .. } => write!(f, "N {path}: {rhs}"),
            Self::Deleted { lhs, .. } => write!(f, "D {path}: {lhs}"),
            Self::Edited { lhs, rhs, .. } => write!(f, "E {path}: {lhs} -> {rhs}"),
            Self::Array { item, .. } => write!(f, "A {path}: {item}"),
        }
    }
}

/// Element-level change inside an array-change record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ArrayItem {
    #[serde(rename = "N")]
    New { rhs: Value },
    #[serde(rename = "D")]
    Deleted { lhs: Value },
    #[serde(rename = "E")]
    Edited { lhs: Value, rhs: Value },
}

impl fmt::Display for ArrayItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New { rhs } => write!(f, "+ {rhs}"),
            Self::Deleted { lhs } => write!(f, "- {lhs}"),
            Self::Edited { lhs, rhs } => write!(f, "{lhs} -> {rhs}"),
        }
    }
}

/// Ordered result of comparing two trees.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet {
    /// The list of changes, in replay order.
    pub changes: Vec<ChangeRecord>,
}

impl ChangeSet {
    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeRecord> {
        self.changes.iter()
    }

    /// Number of new-key records.
    pub fn additions(&self) -> usize {
        self.count(ChangeKind::New)
    }

    /// Number of deleted-key records.
    pub fn deletions(&self) -> usize {
        self.count(ChangeKind::Deleted)
    }

    /// Number of edited-value records.
    pub fn edits(&self) -> usize {
        self.count(ChangeKind::Edited)
    }

    /// Number of array-change records.
    pub fn array_changes(&self) -> usize {
        self.count(ChangeKind::ArrayChange)
    }

    fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind() == kind).count()
    }
}

impl IntoIterator for ChangeSet {
    type Item = ChangeRecord;
    type IntoIter = std::vec::IntoIter<ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ChangeRecord;
    type IntoIter = std::slice::Iter<'a, ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
