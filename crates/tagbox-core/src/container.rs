//! The box container: construction, path resolution and accessors.

use serde::Serialize;
use serde_json::Value;
use tagbox_types::{access, IdGenerator, Path, Sequence, UuidGenerator};
use tracing::debug;

use crate::content::Content;
use crate::error::{BoxError, BoxResult};
use crate::tags::Tags;
use crate::truthy;

/// A tagged, path-addressable JSON container.
///
/// The payload is always a keyed container; scalars are stored under
/// [`SCALAR_KEY`](crate::SCALAR_KEY). Tags travel beside the payload and
/// steer path resolution (`scope`, `glossary`) and messaging (`id`,
/// `notify`). `Clone` is a deep copy.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TagBox {
    payload: Value,
    tags: Tags,
    sequence: Sequence,
    #[serde(skip)]
    last_error: Option<BoxError>,
}

impl TagBox {
    /// Build a box with no tags and a fresh sequence.
    ///
    /// Building from another box copies it outright.
    pub fn new(content: impl Into<Content>) -> Self {
        Self::with_generator(content, None, &UuidGenerator)
    }

    pub fn with_tags(content: impl Into<Content>, tags: Tags) -> Self {
        Self::with_generator(content, Some(tags), &UuidGenerator)
    }

    /// Build a box drawing its sequence from `ids`.
    ///
    /// When `content` is a box, the copy keeps that box's tags and sequence
    /// and `tags` is ignored.
    pub fn with_generator(
        content: impl Into<Content>,
        tags: Option<Tags>,
        ids: &dyn IdGenerator,
    ) -> Self {
        match content.into() {
            Content::Boxed(original) => *original,
            other => Self {
                payload: Value::Object(other.into_payload()),
                tags: tags.unwrap_or_default(),
                sequence: ids.next_id(),
                last_error: None,
            },
        }
    }

    /// Build a new box that shares this box's sequence, e.g. the response
    /// to a request.
    pub fn derive_with_same_sequence(&self, content: impl Into<Content>, tags: Option<Tags>) -> Self {
        let mut derived = Self::with_generator(content, tags, &UuidGenerator);
        derived.sequence = self.sequence.clone();
        debug!(sequence = %self.sequence.short_id(), "derived box with shared sequence");
        derived
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }

    pub(crate) fn payload_mut(&mut self) -> &mut Value {
        &mut self.payload
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub(crate) fn tags_mut(&mut self) -> &mut Tags {
        &mut self.tags
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn last_error(&self) -> Option<&BoxError> {
        self.last_error.as_ref()
    }

    pub fn set_last_error(&mut self, error: Option<BoxError>) {
        self.last_error = error;
    }

    // ---- Path resolution ----

    /// Translate a path through the glossary tag. Identity without one.
    pub fn path_map(&self, path: impl Into<Path>) -> Path {
        let path = path.into();
        match self.glossary() {
            Some(glossary) => glossary.map_path(&path),
            None => path,
        }
    }

    /// Apply the scope prefix, then the glossary.
    pub fn resolve(&self, path: impl Into<Path>) -> Path {
        let path = path.into();
        let scoped = match self.get_scope_tag() {
            Some(scope) if !scope.is_empty() => path.with_prefix(&Path::parse(scope)),
            _ => path,
        };
        self.path_map(scoped)
    }

    /// Resolve a caller path, rejecting paths that are empty or would
    /// address the payload root.
    fn resolve_checked(&self, path: impl Into<Path>) -> BoxResult<Path> {
        let path = path.into();
        path.validate()?;
        let resolved = self.resolve(path);
        if resolved.is_empty() {
            return Err(BoxError::InvalidPath(resolved.join()));
        }
        Ok(resolved)
    }

    // ---- Accessors ----

    /// Value at `path`, or `None` when absent.
    ///
    /// Fails with [`BoxError::InvalidPath`] for an empty path or one with
    /// empty segments.
    pub fn get(&self, path: impl Into<Path>) -> BoxResult<Option<&Value>> {
        let resolved = self.resolve_checked(path)?;
        Ok(access::get(&self.payload, resolved.segments()))
    }

    /// Assign `value` at `path`, creating intermediate objects.
    ///
    /// On error the payload is left as it was.
    pub fn set(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> BoxResult<()> {
        let resolved = self.resolve_checked(path)?;
        access::set(&mut self.payload, resolved.segments(), value.into())?;
        Ok(())
    }

    /// `true` only when a value exists at `path` and is neither falsy nor
    /// loosely equal to `false` (so `0`, `""` and `false` report absent).
    pub fn has(&self, path: impl Into<Path>) -> bool {
        match self.resolve_checked(path) {
            Ok(resolved) => access::get(&self.payload, resolved.segments())
                .is_some_and(truthy::is_present),
            Err(_) => false,
        }
    }

    /// Remove the value at `path`, returning it. Missing paths are a no-op.
    pub fn del(&mut self, path: impl Into<Path>) -> Option<Value> {
        let resolved = self.resolve_checked(path).ok()?;
        access::remove(&mut self.payload, resolved.segments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SCALAR_KEY;
    use crate::tags::{TAG_GLOSSARY, TAG_SCOPE};
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(AtomicUsize);

    impl IdGenerator for Counter {
        fn next_id(&self) -> Sequence {
            Sequence::new(format!("seq-{}", self.0.fetch_add(1, Ordering::SeqCst)))
        }
    }

    #[test]
    fn scalar_is_wrapped() {
        let b = TagBox::new(json!(7));
        assert_eq!(b.payload(), &json!({"_v": 7}));
        assert_eq!(b.get(SCALAR_KEY).unwrap(), Some(&json!(7)));
    }

    #[test]
    fn null_is_wrapped() {
        let b = TagBox::new(Value::Null);
        assert_eq!(b.payload(), &json!({"_v": null}));
    }

    #[test]
    fn container_initializes_payload() {
        let b = TagBox::new(json!({"a": {"b": 1}}));
        assert_eq!(b.get("a.b").unwrap(), Some(&json!(1)));
        assert!(b.tags().is_empty());
    }

    #[test]
    fn generator_supplies_sequence() {
        let ids = Counter(AtomicUsize::new(0));
        let a = TagBox::with_generator(json!({}), None, &ids);
        let b = TagBox::with_generator(json!({}), None, &ids);
        assert_eq!(a.sequence().as_str(), "seq-0");
        assert_eq!(b.sequence().as_str(), "seq-1");
    }

    #[test]
    fn copy_from_box_ignores_tags_argument() {
        let original = TagBox::with_tags(json!({"a": 1}), Tags::new().with("k", "v"));
        let copy = TagBox::with_tags(&original, Tags::new().with("other", 1));
        assert_eq!(copy, original);
        assert!(!copy.has_tag("other"));
    }

    #[test]
    fn copy_does_not_alias() {
        let original = TagBox::with_tags(json!({"a": {"b": 1}}), Tags::new().with("k", "v"));
        let mut copy = TagBox::new(&original);
        copy.set("a.b", 2).unwrap();
        copy.add_tag("k", "changed");
        assert_eq!(original.get("a.b").unwrap(), Some(&json!(1)));
        assert_eq!(original.get_tag("k"), Some(&json!("v")));
        assert_eq!(copy.sequence(), original.sequence());
    }

    #[test]
    fn derived_box_shares_sequence() {
        let request = TagBox::with_tags(json!({"q": 1}), Tags::new().with("notify", false));
        let response = request.derive_with_same_sequence(json!({"r": 2}), Some(Tags::new()));
        assert_eq!(response.sequence(), request.sequence());
        assert_eq!(response.get_id(), request.get_id());
        assert_ne!(response.payload(), request.payload());
        assert!(response.tags().is_empty());
    }

    #[test]
    fn derived_from_box_content_still_takes_receiver_sequence() {
        let request = TagBox::new(json!({}));
        let other = TagBox::new(json!({"x": 1}));
        let derived = request.derive_with_same_sequence(&other, None);
        assert_eq!(derived.sequence(), request.sequence());
        assert_eq!(derived.payload(), other.payload());
    }

    #[test]
    fn get_rejects_empty_path() {
        let b = TagBox::new(json!({"a": 1}));
        assert_eq!(b.get(""), Err(BoxError::InvalidPath(String::new())));
        assert!(matches!(b.get("a..b"), Err(BoxError::InvalidPath(_))));
    }

    #[test]
    fn get_missing_is_none() {
        let b = TagBox::new(json!({"a": 1}));
        assert_eq!(b.get("nope.deeper").unwrap(), None);
    }

    #[test]
    fn set_then_get_and_has() {
        let mut b = TagBox::new(json!({}));
        b.set("x.y.z", "hello").unwrap();
        assert_eq!(b.get("x.y.z").unwrap(), Some(&json!("hello")));
        assert!(b.has("x.y.z"));
        assert!(b.has(["x", "y"]));
    }

    #[test]
    fn set_conflict_leaves_payload_untouched() {
        let mut b = TagBox::new(json!({"a": 5}));
        let err = b.set("a.b.c", 1).unwrap_err();
        assert!(matches!(err, BoxError::PathConflict { .. }));
        assert_eq!(b.payload(), &json!({"a": 5}));
    }

    #[test]
    fn set_huge_array_index_is_rejected() {
        let mut b = TagBox::new(json!({"xs": [1]}));
        for path in ["xs.18446744073709551615", "xs.100000000000"] {
            assert!(matches!(b.set(path, 1), Err(BoxError::PathConflict { .. })));
            assert_eq!(b.payload(), &json!({"xs": [1]}));
        }
        b.set("xs.3", 4).unwrap();
        assert_eq!(b.payload(), &json!({"xs": [1, null, null, 4]}));
    }

    #[test]
    fn has_treats_falsy_as_absent() {
        let b = TagBox::new(json!({"zero": 0, "empty": "", "no": false, "nil": null, "yes": 1}));
        assert!(!b.has("zero"));
        assert!(!b.has("empty"));
        assert!(!b.has("no"));
        assert!(!b.has("nil"));
        assert!(!b.has("missing"));
        assert!(!b.has(""));
        assert!(b.has("yes"));
    }

    #[test]
    fn del_removes_and_is_noop_when_missing() {
        let mut b = TagBox::new(json!({"a": {"b": 1, "c": 2}}));
        assert_eq!(b.del("a.b"), Some(json!(1)));
        assert!(!b.has("a.b"));
        assert_eq!(b.del("a.b"), None);
        assert_eq!(b.del("q.r.s"), None);
        assert_eq!(b.del(""), None);
        assert_eq!(b.payload(), &json!({"a": {"c": 2}}));
    }

    #[test]
    fn scope_prefixes_every_accessor() {
        let mut b = TagBox::new(json!({"a": {"b": {"c": 100}}}));
        b.set_scope_tag("a.b");
        assert_eq!(b.get("c").unwrap(), Some(&json!(100)));
        b.set("d", 10).unwrap();
        assert_eq!(b.payload(), &json!({"a": {"b": {"c": 100, "d": 10}}}));
        assert!(b.has("d"));
        b.del("c");
        assert_eq!(b.payload(), &json!({"a": {"b": {"d": 10}}}));
    }

    #[test]
    fn empty_scope_is_ignored() {
        let mut b = TagBox::new(json!({"a": 1}));
        b.add_tag(TAG_SCOPE, "");
        assert_eq!(b.get("a").unwrap(), Some(&json!(1)));
    }

    #[test]
    fn glossary_translates_lookup() {
        let mut b = TagBox::new(json!({"a": 5}));
        b.add_tag(TAG_GLOSSARY, json!({"x": "a"}));
        assert_eq!(b.get("x").unwrap(), Some(&json!(5)));
        assert_eq!(b.path_map("x").join(), "a");
    }

    #[test]
    fn glossary_applies_after_scope() {
        let mut b = TagBox::new(json!({"user": {"name": "ada"}}));
        b.set_scope_tag("user");
        b.add_tag(TAG_GLOSSARY, json!({"user.nm": "name"}));
        assert_eq!(b.get("nm").unwrap(), Some(&json!("ada")));
        assert_eq!(b.resolve("nm").join(), "user.name");
    }

    #[test]
    fn resolution_does_not_touch_glossary() {
        let mut b = TagBox::new(json!({"a": 5}));
        b.add_tag(TAG_GLOSSARY, json!({"x": "a"}));
        let before = b.tags().clone();
        let _ = b.get("x");
        b.set("x", 6).unwrap();
        assert_eq!(b.tags(), &before);
    }

    #[test]
    fn path_map_without_glossary_is_identity() {
        let b = TagBox::new(json!({}));
        assert_eq!(b.path_map("a.b.c").join(), "a.b.c");
        assert_eq!(b.path_map("").join(), "");
    }

    #[test]
    fn glossary_mapping_to_empty_cannot_replace_root() {
        let mut b = TagBox::new(json!({"a": 1}));
        b.add_tag(TAG_GLOSSARY, json!({"x": ""}));
        assert!(matches!(b.set("x", 2), Err(BoxError::InvalidPath(_))));
        assert_eq!(b.payload(), &json!({"a": 1}));
    }

    #[test]
    fn last_error_slot() {
        let mut b = TagBox::new(json!({}));
        assert_eq!(b.last_error(), None);
        b.set_last_error(Some(BoxError::Unsupported("union")));
        assert_eq!(b.last_error(), Some(&BoxError::Unsupported("union")));
        let copy = TagBox::new(&b);
        assert_eq!(copy.last_error(), b.last_error());
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            ".{0,8}".prop_map(Value::String),
        ]
    }

    proptest! {
        #[test]
        fn scalar_roundtrips_through_v(v in scalar()) {
            let b = TagBox::new(v.clone());
            prop_assert_eq!(b.get(SCALAR_KEY).unwrap(), Some(&v));
        }

        #[test]
        fn set_get_on_fresh_path(
            segs in prop::collection::vec("[a-z]{1,5}", 1..5),
            n in 1i64..1000,
        ) {
            let mut b = TagBox::new(json!({}));
            let path = segs.join(".");
            b.set(path.as_str(), n).unwrap();
            prop_assert_eq!(b.get(path.as_str()).unwrap(), Some(&json!(n)));
            prop_assert!(b.has(path.as_str()));
        }
    }
}
