//! Generic path accessor over `serde_json` values.
//!
//! Objects are addressed by key and arrays by decimal index. Writes create
//! missing intermediate objects (and replace `null` intermediates), pad
//! arrays with `null` when an index lies up to [`MAX_ARRAY_PADDING`] slots
//! past the end, and refuse to descend through scalars. A failed write
//! leaves the value untouched.

use serde_json::{Map, Value};

use crate::error::TypeError;

/// Most `null` slots a single write may add in front of a new array element.
pub const MAX_ARRAY_PADDING: usize = 4096;

/// Returns `true` if writing `idx` into an array of `len` elements stays
/// within [`MAX_ARRAY_PADDING`].
pub fn index_writable(len: usize, idx: usize) -> bool {
    idx <= len.saturating_add(MAX_ARRAY_PADDING)
}

/// Read the value at `segments`. Zero segments yields the root.
pub fn get<'a>(root: &'a Value, segments: &[String]) -> Option<&'a Value> {
    let mut current = root;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Mutable variant of [`get`].
pub fn get_mut<'a>(root: &'a mut Value, segments: &[String]) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get_mut(segment)?,
            Value::Array(arr) => {
                let idx = segment.parse::<usize>().ok()?;
                arr.get_mut(idx)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Returns `true` if a value is stored at `segments`.
pub fn exists(root: &Value, segments: &[String]) -> bool {
    get(root, segments).is_some()
}

/// Assign `value` at `segments`, creating intermediate containers.
///
/// Zero segments replaces the root.
pub fn set(root: &mut Value, segments: &[String], value: Value) -> Result<(), TypeError> {
    let Some((last, parents)) = segments.split_last() else {
        *root = value;
        return Ok(());
    };
    check_writable(root, segments)?;

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        current = child_or_insert(current, segment)
            .ok_or_else(|| conflict(&segments[..depth], segment))?;
    }
    insert_child(current, last, value).map_err(|_| conflict(parents, last))
}

/// Remove and return the value at `segments`. Missing paths are a no-op.
pub fn remove(root: &mut Value, segments: &[String]) -> Option<Value> {
    let (last, parents) = segments.split_last()?;
    match get_mut(root, parents)? {
        Value::Object(map) => map.remove(last),
        Value::Array(arr) => {
            let idx = last.parse::<usize>().ok()?;
            (idx < arr.len()).then(|| arr.remove(idx))
        }
        _ => None,
    }
}

/// Walk the existing part of `segments` without mutating, so a write that
/// would hit a scalar fails before anything is created.
fn check_writable(root: &Value, segments: &[String]) -> Result<(), TypeError> {
    let mut current = root;
    for (depth, segment) in segments.iter().enumerate() {
        let next = match current {
            Value::Null => return Ok(()),
            Value::Object(map) => map.get(segment),
            Value::Array(arr) => match segment.parse::<usize>() {
                Ok(idx) if index_writable(arr.len(), idx) => arr.get(idx),
                _ => return Err(conflict(&segments[..depth], segment)),
            },
            _ => return Err(conflict(&segments[..depth], segment)),
        };
        match next {
            Some(v) => current = v,
            None => return Ok(()),
        }
    }
    Ok(())
}

fn child_or_insert<'a>(current: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    if current.is_null() {
        *current = Value::Object(Map::new());
    }
    match current {
        Value::Object(map) => Some(
            map.entry(segment.to_owned())
                .or_insert_with(|| Value::Object(Map::new())),
        ),
        Value::Array(arr) => {
            let idx = segment.parse::<usize>().ok()?;
            if !index_writable(arr.len(), idx) {
                return None;
            }
            if idx >= arr.len() {
                arr.resize(idx, Value::Null);
                arr.push(Value::Object(Map::new()));
            }
            arr.get_mut(idx)
        }
        _ => None,
    }
}

fn insert_child(current: &mut Value, segment: &str, value: Value) -> Result<(), Value> {
    if current.is_null() {
        *current = Value::Object(Map::new());
    }
    match current {
        Value::Object(map) => {
            map.insert(segment.to_owned(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = match segment.parse::<usize>() {
                Ok(idx) if index_writable(arr.len(), idx) => idx,
                _ => return Err(value),
            };
            if idx < arr.len() {
                arr[idx] = value;
            } else {
                arr.resize(idx, Value::Null);
                arr.push(value);
            }
            Ok(())
        }
        _ => Err(value),
    }
}

fn conflict(parents: &[String], segment: &str) -> TypeError {
    TypeError::PathConflict {
        path: parents.join("."),
        segment: segment.to_owned(),
    }
}
