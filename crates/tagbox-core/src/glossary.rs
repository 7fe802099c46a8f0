//! Per-segment key renaming.
//!
//! A glossary maps dotted prefixes to replacement segments. During lookup
//! every prefix of the path is checked; on a hit only the last segment of
//! that prefix is replaced, so deep keys can be renamed without remapping
//! their ancestors. Entries whose value is not a string are ignored.

use serde_json::{Map, Value};
use tagbox_types::Path;

/// Read-only view over a glossary tag.
#[derive(Clone, Copy, Debug)]
pub struct Glossary<'a> {
    entries: &'a Map<String, Value>,
}

impl<'a> Glossary<'a> {
    pub fn new(entries: &'a Map<String, Value>) -> Self {
        Self { entries }
    }

    /// View a tag value as a glossary. Only objects qualify.
    pub fn from_tag(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    fn lookup(&self, prefix: &str) -> Option<&'a str> {
        self.entries.get(prefix).and_then(Value::as_str)
    }

    /// Translate a path segment by segment.
    ///
    /// Replacement segments may themselves contain dots; the rejoined
    /// result is split again.
    pub fn map_path(&self, path: &Path) -> Path {
        let mapped: Vec<&str> = path
            .prefixes()
            .zip(path.segments())
            .map(|(prefix, segment)| self.lookup(&prefix).unwrap_or(segment.as_str()))
            .collect();
        Path::parse(&mapped.join("."))
    }

    /// Translate one dotted string.
    pub fn translate(&self, dotted: &str) -> String {
        self.map_path(&Path::parse(dotted)).join()
    }

    /// Rewrite an incoming glossary through this one: every string value is
    /// translated before the result replaces the current glossary.
    pub fn layer(&self, incoming: &Map<String, Value>) -> Map<String, Value> {
        incoming
            .iter()
            .map(|(word, target)| {
                let target = match target {
                    Value::String(s) => Value::String(self.translate(s)),
                    other => other.clone(),
                };
                (word.clone(), target)
            })
            .collect()
    }
}
