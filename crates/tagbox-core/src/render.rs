//! Read-only rendering of a box payload.

use std::fmt;

use serde_json::{Map, Value};
use tagbox_types::{access, Path};
use tracing::debug;

use crate::container::TagBox;
use crate::error::BoxResult;

/// How a payload is rendered.
///
/// The default strips hidden keys, applies no path filter, and renders
/// compact JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Keep top-level keys starting with `_`.
    pub show_hidden: bool,
    /// When non-empty, only these raw dotted paths are rendered.
    pub paths: Vec<String>,
    pub pretty: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = show;
        self
    }

    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl TagBox {
    /// The document that [`to_json_string`](Self::to_json_string) prints.
    pub fn render(&self, opts: &RenderOptions) -> Value {
        let mut doc = self.payload().clone();
        if !opts.show_hidden {
            if let Value::Object(map) = &mut doc {
                map.retain(|key, _| !key.starts_with('_'));
            }
        }
        if opts.paths.is_empty() {
            return doc;
        }

        let mut filtered = Value::Object(Map::new());
        for dotted in &opts.paths {
            let path = Path::parse(dotted);
            if path.validate().is_err() {
                continue;
            }
            let Some(value) = access::get(&doc, path.segments()) else {
                continue;
            };
            if let Err(e) = access::set(&mut filtered, path.segments(), value.clone()) {
                debug!(path = %dotted, error = %e, "skipping overlapping render path");
            }
        }
        filtered
    }

    pub fn to_json_string(&self, opts: &RenderOptions) -> BoxResult<String> {
        let doc = self.render(opts);
        let text = if opts.pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        Ok(text)
    }
}

impl fmt::Display for TagBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .to_json_string(&RenderOptions::default())
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
