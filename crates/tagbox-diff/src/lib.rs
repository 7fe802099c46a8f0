//! Structural differ for TagBox.
//!
//! Compares two JSON trees and produces an ordered list of change records,
//! each of which can be replayed onto a target tree in place.
//!
//! # Key Types
//!
//! - [`ChangeSet`] / [`ChangeRecord`] / [`ChangeKind`] -- Structural diff (new/deleted/edited/array-change)
//! - [`ArrayItem`] -- Element-level change carried by an array-change record
//! - [`TextDiff`] / [`DiffHunk`] / [`DiffLine`] -- Line-level diff of rendered documents

pub mod apply;
pub mod change;
pub mod error;
pub mod structural;
pub mod text_diff;

pub use apply::{apply_change, apply_changes};
pub use change::{ArrayItem, ChangeKind, ChangeRecord, ChangeSet};
pub use error::{DiffError, DiffResult};
pub use structural::diff;
pub use text_diff::{diff_documents, diff_text, DiffHunk, DiffLine, TextDiff};
