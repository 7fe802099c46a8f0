//! What a box can be built from.

use serde_json::{Map, Value};

use crate::container::TagBox;

/// Key under which a scalar payload is stored.
pub const SCALAR_KEY: &str = "_v";

/// The three shapes a box can be constructed from, resolved once at entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    /// Copy of an existing box: payload, tags, sequence and error.
    Boxed(Box<TagBox>),
    /// A keyed container that becomes the payload.
    Container(Map<String, Value>),
    /// Anything else, stored under [`SCALAR_KEY`].
    Scalar(Value),
}

impl Content {
    /// Payload for the non-box shapes. A boxed value yields its payload.
    pub fn into_payload(self) -> Map<String, Value> {
        match self {
            Content::Boxed(b) => match b.into_payload() {
                Value::Object(map) => map,
                other => wrap_scalar(other),
            },
            Content::Container(map) => map,
            Content::Scalar(v) => wrap_scalar(v),
        }
    }
}

impl From<Value> for Content {
    /// Objects are taken as-is. Arrays become objects keyed by decimal
    /// index, as if merged into an empty container.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Content::Container(map),
            Value::Array(items) => Content::Container(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect(),
            ),
            other => Content::Scalar(other),
        }
    }
}

impl From<&Value> for Content {
    fn from(value: &Value) -> Self {
        Content::from(value.clone())
    }
}

impl From<Map<String, Value>> for Content {
    fn from(map: Map<String, Value>) -> Self {
        Content::Container(map)
    }
}

impl From<TagBox> for Content {
    fn from(b: TagBox) -> Self {
        Content::Boxed(Box::new(b))
    }
}

impl From<&TagBox> for Content {
    fn from(b: &TagBox) -> Self {
        Content::Boxed(Box::new(b.clone()))
    }
}

fn wrap_scalar(v: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(SCALAR_KEY.to_owned(), v);
    map
}

/// Normalise any value into a keyed container the way construction does.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Object(_) => value.clone(),
        other => Value::Object(Content::from(other).into_payload()),
    }
}
