//! Structural diff and selective merge between a box and another value.

use serde_json::Value;
use tagbox_diff::{apply_change, ChangeSet};
use tracing::{debug, warn};

use crate::container::TagBox;
use crate::content::normalize;
use crate::error::{BoxError, BoxResult};

impl TagBox {
    /// Change records that turn this payload into `other`.
    ///
    /// `other` is normalised like construction input, so a scalar compares
    /// as `{"_v": scalar}`.
    pub fn diff(&self, other: &Value) -> ChangeSet {
        tagbox_diff::diff(self.payload(), &normalize(other))
    }

    /// Diff against another box's payload.
    pub fn diff_box(&self, other: &TagBox) -> ChangeSet {
        self.diff(other.payload())
    }

    /// Apply every non-deletion change from `other` in place.
    ///
    /// Keys present here but absent from `other` survive. The payload is
    /// only replaced once every record has applied.
    pub fn merge(&mut self, other: &Value) -> BoxResult<&mut Self> {
        let changes = self.diff(other);
        let mut working = self.payload().clone();
        let mut skipped = 0usize;
        for record in &changes {
            if record.is_deletion() {
                skipped += 1;
                continue;
            }
            apply_change(&mut working, record)?;
        }
        debug!(
            sequence = %self.sequence().short_id(),
            applied = changes.len() - skipped,
            skipped,
            "merged payload"
        );
        *self.payload_mut() = working;
        Ok(self)
    }

    /// Merge another box's payload. Its tags are not merged.
    pub fn merge_box(&mut self, other: &TagBox) -> BoxResult<&mut Self> {
        self.merge(other.payload())
    }

    /// Not supported: there is no defined union semantics.
    pub fn union(&self, _other: &Value) -> BoxResult<&Self> {
        warn!(sequence = %self.sequence().short_id(), "union requested but not supported");
        Err(BoxError::Unsupported("union"))
    }
}
