//! Out-of-band metadata attached to a box.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::container::TagBox;
use crate::glossary::Glossary;

/// Explicit identifier override.
pub const TAG_ID: &str = "id";
/// Dotted prefix applied to every path operation.
pub const TAG_SCOPE: &str = "scope";
/// Per-segment renaming applied during path resolution.
pub const TAG_GLOSSARY: &str = "glossary";
/// Marks a one-way notification rather than a request.
pub const TAG_NOTIFY: &str = "notify";

/// Tag name to arbitrary value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(Map<String, Value>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }
}

impl From<Map<String, Value>> for Tags {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl TagBox {
    /// Set a tag.
    ///
    /// A new glossary is first translated through the current one, so
    /// glossary updates layer on top of each other.
    pub fn add_tag(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let mut value = value.into();
        if name == TAG_GLOSSARY {
            let layered = match (&value, self.glossary()) {
                (Value::Object(incoming), Some(current)) => Some(current.layer(incoming)),
                _ => None,
            };
            if let Some(layered) = layered {
                debug!(entries = layered.len(), "layered glossary over existing one");
                value = Value::Object(layered);
            }
        }
        self.tags_mut().insert(name, value);
    }

    /// Alias for [`add_tag`](Self::add_tag).
    pub fn set_tag(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.add_tag(name, value);
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags().contains(name)
    }

    pub fn get_tag(&self, name: &str) -> Option<&Value> {
        self.tags().get(name)
    }

    /// Remove a tag. Missing tags are a no-op.
    pub fn remove_tag(&mut self, name: &str) -> Option<Value> {
        self.tags_mut().remove(name)
    }

    /// The `id` tag when set, otherwise the sequence.
    pub fn get_id(&self) -> String {
        match self.get_tag(TAG_ID) {
            None | Some(Value::Null) => self.sequence().to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn get_notify_tag(&self) -> bool {
        self.get_tag(TAG_NOTIFY)
            .is_some_and(crate::truthy::is_truthy)
    }

    /// `false` removes the tag instead of storing it.
    pub fn set_notify_tag(&mut self, notify: bool) {
        if notify {
            self.add_tag(TAG_NOTIFY, true);
        } else {
            self.remove_tag(TAG_NOTIFY);
        }
    }

    pub fn get_scope_tag(&self) -> Option<&str> {
        self.get_tag(TAG_SCOPE).and_then(Value::as_str)
    }

    pub fn set_scope_tag(&mut self, scope: impl Into<String>) {
        self.add_tag(TAG_SCOPE, scope.into());
    }

    pub fn get_glossary_tag(&self) -> Option<&Map<String, Value>> {
        self.get_tag(TAG_GLOSSARY).and_then(Value::as_object)
    }

    /// `None` removes the glossary.
    pub fn set_glossary_tag(&mut self, glossary: Option<Map<String, Value>>) {
        match glossary {
            Some(map) => self.add_tag(TAG_GLOSSARY, Value::Object(map)),
            None => {
                self.remove_tag(TAG_GLOSSARY);
            }
        }
    }

    pub(crate) fn glossary(&self) -> Option<Glossary<'_>> {
        self.get_tag(TAG_GLOSSARY).and_then(Glossary::from_tag)
    }
}
