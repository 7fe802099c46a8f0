//! Replay change records onto a target tree.

use serde_json::Value;
use tagbox_types::{access, PathStep};

use crate::change::{ArrayItem, ChangeRecord};
use crate::error::{DiffError, DiffResult};

/// Apply one change record to `target` in place.
///
/// New and edited values are assigned at the record's path, creating
/// intermediate objects. Deletions of missing keys are a no-op. An
/// array-change creates the array when it does not exist yet.
pub fn apply_change(target: &mut Value, record: &ChangeRecord) -> DiffResult<()> {
    match record {
        ChangeRecord::New { path, rhs } | ChangeRecord::Edited { path, rhs, .. } => {
            access::set(target, &segments(path), rhs.clone())?;
        }
        ChangeRecord::Deleted { path, .. } => {
            access::remove(target, &segments(path));
        }
        ChangeRecord::Array { path, index, item } => {
            let segs = segments(path);
            let len = match access::get(target, &segs) {
                None => 0,
                Some(Value::Array(arr)) => arr.len(),
                Some(_) => return Err(DiffError::NotAnArray { path: segs.join(".") }),
            };
            if !matches!(item, ArrayItem::Deleted { .. }) && !access::index_writable(len, *index) {
                return Err(DiffError::IndexOutOfRange { path: segs.join("."), index: *index });
            }
            if len == 0 && !access::exists(target, &segs) {
                access::set(target, &segs, Value::Array(Vec::new()))?;
            }
            let Some(Value::Array(arr)) = access::get_mut(target, &segs) else {
                return Err(DiffError::NotAnArray { path: segs.join(".") });
            };
            match item {
                ArrayItem::New { rhs } | ArrayItem::Edited { rhs, .. } => {
                    if *index < arr.len() {
                        arr[*index] = rhs.clone();
                    } else {
                        arr.resize(*index, Value::Null);
                        arr.push(rhs.clone());
                    }
                }
                ArrayItem::Deleted { .. } => {
                    if *index < arr.len() {
                        arr.remove(*index);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Apply every record in order, stopping at the first failure.
pub fn apply_changes<'a, I>(target: &mut Value, records: I) -> DiffResult<()>
where
    I: IntoIterator<Item = &'a ChangeRecord>,
{
    for record in records {
        apply_change(target, record)?;
    }
    Ok(())
}

fn segments(path: &[PathStep]) -> Vec<String> {
    path.iter().map(PathStep::as_segment).collect()
}
