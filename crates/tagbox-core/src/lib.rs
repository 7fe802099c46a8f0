//! TagBox: a tagged, path-addressable JSON container.
//!
//! A [`TagBox`] wraps a JSON payload and carries tags beside it. Paths are
//! dotted strings or segment lists; before touching the payload they are
//! prefixed with the `scope` tag and translated through the `glossary` tag.
//! Boxes can be diffed against any JSON value and merged additively.
//!
//! ```
//! use serde_json::json;
//! use tagbox_core::TagBox;
//!
//! let mut request = TagBox::new(json!({"a": {"b": {"c": 100}}}));
//! request.set_scope_tag("a.b");
//! assert_eq!(request.get("c").unwrap(), Some(&json!(100)));
//!
//! let response = request.derive_with_same_sequence(json!({"ok": true}), None);
//! assert_eq!(response.get_id(), request.get_id());
//! ```
//!
//! # Key Types
//!
//! - [`TagBox`] — The container
//! - [`Content`] — What a box is built from (box, container or scalar)
//! - [`Tags`] — Out-of-band metadata, with reserved names [`TAG_ID`],
//!   [`TAG_SCOPE`], [`TAG_GLOSSARY`] and [`TAG_NOTIFY`]
//! - [`Glossary`] — Read-only view used for per-segment renaming
//! - [`RenderOptions`] — Hidden-key and path filtering for printing

pub mod container;
pub mod content;
pub mod error;
pub mod glossary;
mod merge;
pub mod render;
pub mod tags;
mod truthy;

pub use container::TagBox;
pub use content::{Content, SCALAR_KEY};
pub use error::{BoxError, BoxResult};
pub use glossary::Glossary;
pub use render::RenderOptions;
pub use tags::{Tags, TAG_GLOSSARY, TAG_ID, TAG_NOTIFY, TAG_SCOPE};

// Re-export collaborator types
pub use tagbox_diff::{ArrayItem, ChangeKind, ChangeRecord, ChangeSet};
pub use tagbox_types::{IdGenerator, Path, Sequence, UuidGenerator};
