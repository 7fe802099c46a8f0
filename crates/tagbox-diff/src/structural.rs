//! Structural diff: compare two JSON trees.
//!
//! Objects are compared key by key and recursed into; arrays are compared
//! index by index, with length differences reported as array-change
//! records. Any other difference (including a type change) is an edit of
//! the whole value.

use serde_json::{Map, Value};
use tagbox_types::PathStep;

use crate::change::{ArrayItem, ChangeRecord, ChangeSet};

/// Compute the ordered change records that turn `lhs` into `rhs`.
///
/// Within an object, deletions and recursive changes follow `lhs` key order,
/// then new keys follow `rhs` key order. Trailing array removals are emitted
/// highest index first so that replaying them in order is index-stable.
pub fn diff(lhs: &Value, rhs: &Value) -> ChangeSet {
    let mut changes = Vec::new();
    diff_at(&mut changes, &mut Vec::new(), lhs, rhs);
    ChangeSet { changes }
}

fn diff_at(out: &mut Vec<ChangeRecord>, path: &mut Vec<PathStep>, lhs: &Value, rhs: &Value) {
    if lhs == rhs {
        return;
    }
    match (lhs, rhs) {
        (Value::Object(l), Value::Object(r)) => diff_objects(out, path, l, r),
        (Value::Array(l), Value::Array(r)) => diff_arrays(out, path, l, r),
        _ => out.push(ChangeRecord::Edited {
            path: path.clone(),
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        }),
    }
}

fn diff_objects(
    out: &mut Vec<ChangeRecord>,
    path: &mut Vec<PathStep>,
    lhs: &Map<String, Value>,
    rhs: &Map<String, Value>,
) {
    for (key, l) in lhs {
        path.push(PathStep::Key(key.clone()));
        match rhs.get(key) {
            Some(r) => diff_at(out, path, l, r),
            None => out.push(ChangeRecord::Deleted {
                path: path.clone(),
                lhs: l.clone(),
            }),
        }
        path.pop();
    }

    for (key, r) in rhs {
        if !lhs.contains_key(key) {
            path.push(PathStep::Key(key.clone()));
            out.push(ChangeRecord::New {
                path: path.clone(),
                rhs: r.clone(),
            });
            path.pop();
        }
    }
}

fn diff_arrays(out: &mut Vec<ChangeRecord>, path: &mut Vec<PathStep>, lhs: &[Value], rhs: &[Value]) {
    let common = lhs.len().min(rhs.len());

    for (i, (l, r)) in lhs.iter().zip(rhs).enumerate() {
        if l == r {
            continue;
        }
        if is_container(l) && is_container(r) {
            path.push(PathStep::Index(i));
            diff_at(out, path, l, r);
            path.pop();
        } else {
            out.push(ChangeRecord::Array {
                path: path.clone(),
                index: i,
                item: ArrayItem::Edited {
                    lhs: l.clone(),
                    rhs: r.clone(),
                },
            });
        }
    }

    for (i, r) in rhs.iter().enumerate().skip(common) {
        out.push(ChangeRecord::Array {
            path: path.clone(),
            index: i,
            item: ArrayItem::New { rhs: r.clone() },
        });
    }

    for (i, l) in lhs.iter().enumerate().skip(common).rev() {
        out.push(ChangeRecord::Array {
            path: path.clone(),
            index: i,
            item: ArrayItem::Deleted { lhs: l.clone() },
        });
    }
}

fn is_container(v: &Value) -> bool {
    v.is_object() || v.is_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeKind;
    use serde_json::json;

    #[test]
    fn identical_values_no_diff() {
        let v = json!({"a": 1, "b": [1, 2, {"c": "x"}]});
        assert!(diff(&v, &v).is_empty());
    }

    #[test]
    fn empty_to_populated() {
        let d = diff(&json!({}), &json!({"x": 42, "y": "new"}));
        assert_eq!(d.len(), 2);
        assert_eq!(d.additions(), 2);
        assert_eq!(d.deletions(), 0);
    }

    #[test]
    fn populated_to_empty() {
        let d = diff(&json!({"x": 42}), &json!({}));
        assert_eq!(d.len(), 1);
        assert_eq!(d.deletions(), 1);
    }

    #[test]
    fn mixed_changes_in_order() {
        let d = diff(&json!({"a": 1, "b": 2}), &json!({"a": 10, "c": 3}));
        let kinds: Vec<_> = d.iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![ChangeKind::Edited, ChangeKind::Deleted, ChangeKind::New]);
        assert_eq!(
            d.changes[0],
            ChangeRecord::Edited {
                path: vec!["a".into()],
                lhs: json!(1),
                rhs: json!(10)
            }
        );
    }

    #[test]
    fn nested_edit_has_full_path() {
        let d = diff(
            &json!({"config": {"debug": false, "port": 8080}}),
            &json!({"config": {"debug": true, "port": 8080}}),
        );
        assert_eq!(d.len(), 1);
        assert_eq!(d.changes[0].dotted_path(), "config.debug");
    }

    #[test]
    fn type_change_is_an_edit() {
        let d = diff(&json!({"a": {"b": 1}}), &json!({"a": [1]}));
        assert_eq!(d.len(), 1);
        assert_eq!(d.edits(), 1);
        assert_eq!(d.changes[0].dotted_path(), "a");
    }

    #[test]
    fn root_scalar_edit_has_empty_path() {
        let d = diff(&json!(1), &json!("one"));
        assert_eq!(d.len(), 1);
        assert!(d.changes[0].path().is_empty());
    }

    #[test]
    fn array_growth() {
        let d = diff(&json!({"xs": [1]}), &json!({"xs": [1, 2, 3]}));
        assert_eq!(d.array_changes(), 2);
        match &d.changes[0] {
            ChangeRecord::Array { index, item: ArrayItem::New { rhs }, .. } => {
                assert_eq!(*index, 1);
                assert_eq!(*rhs, json!(2));
            }
            other => panic!("expected array addition, got {:?}", other),
        }
    }

    #[test]
    fn array_shrink_is_highest_index_first() {
        let d = diff(&json!([1, 2, 3, 4]), &json!([1, 2]));
        let indices: Vec<_> = d
            .iter()
            .map(|c| match c {
                ChangeRecord::Array { index, .. } => *index,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(indices, vec![3, 2]);
    }

    #[test]
    fn array_element_scalar_edit() {
        let d = diff(&json!([1, 2]), &json!([1, 5]));
        assert_eq!(
            d.changes,
            vec![ChangeRecord::Array {
                path: vec![],
                index: 1,
                item: ArrayItem::Edited { lhs: json!(2), rhs: json!(5) },
            }]
        );
    }

    #[test]
    fn array_element_object_recurses() {
        let d = diff(&json!({"xs": [{"a": 1}]}), &json!({"xs": [{"a": 2}]}));
        assert_eq!(d.len(), 1);
        assert_eq!(d.changes[0].path(), &[PathStep::from("xs"), PathStep::from(0), PathStep::from("a")]);
    }
}
