//! Dotted paths.
//!
//! A [`Path`] is an ordered list of string segments. It can be built from a
//! single dotted string (`"a.b.c"`) or from a list of segments; both forms
//! resolve to the same thing. Array elements are addressed by decimal
//! segments (`"items.0"`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Separator between segments in the dotted form.
pub const SEPARATOR: char = '.';

/// Ordered list of path segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The empty path (zero segments).
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted string. The empty string yields zero segments.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self {
            segments: dotted.split(SEPARATOR).map(str::to_owned).collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Rejoin the segments with `.`.
    pub fn join(&self) -> String {
        self.segments.join(".")
    }

    /// Dotted form of every prefix, shortest first (lengths 1..=N).
    pub fn prefixes(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.segments.len()).map(move |n| self.segments[..n].join("."))
    }

    /// A new path made of `prefix` followed by this path's segments.
    pub fn with_prefix(&self, prefix: &Path) -> Path {
        let mut segments = Vec::with_capacity(prefix.len() + self.len());
        segments.extend_from_slice(&prefix.segments);
        segments.extend_from_slice(&self.segments);
        Path { segments }
    }

    /// A path must have at least one segment and no empty segments.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.segments.is_empty() || self.segments.iter().any(String::is_empty) {
            return Err(TypeError::InvalidPath(self.join()));
        }
        Ok(())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::parse(&s)
    }
}

impl From<&String> for Path {
    fn from(s: &String) -> Self {
        Path::parse(s)
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Path { segments }
    }
}

impl From<&[String]> for Path {
    fn from(segments: &[String]) -> Self {
        Path::from_segments(segments.iter().cloned())
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Path::from_segments(segments.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        Path::from_segments(segments)
    }
}

impl From<&Path> for Path {
    fn from(p: &Path) -> Self {
        p.clone()
    }
}

/// One step of a change record path: an object key or an array index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathStep {
    Index(usize),
    Key(String),
}

impl PathStep {
    /// The step as a dotted-path segment.
    pub fn as_segment(&self) -> String {
        match self {
            PathStep::Index(i) => i.to_string(),
            PathStep::Key(k) => k.clone(),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Index(i) => write!(f, "{i}"),
            PathStep::Key(k) => f.write_str(k),
        }
    }
}

impl From<&str> for PathStep {
    fn from(k: &str) -> Self {
        PathStep::Key(k.to_owned())
    }
}

impl From<usize> for PathStep {
    fn from(i: usize) -> Self {
        PathStep::Index(i)
    }
}
