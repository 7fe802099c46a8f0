//! Foundation types for TagBox.
//!
//! This crate provides the identity and addressing types shared by the
//! differ and the box container. Every other TagBox crate depends on
//! `tagbox-types`.
//!
//! # Key Types
//!
//! - [`Sequence`] — Correlation identifier assigned when a box is created
//! - [`IdGenerator`] — Source of fresh, globally unique sequences
//! - [`UuidGenerator`] — Default generator backed by UUID v7
//! - [`Path`] — Dotted path split into ordered segments
//! - [`PathStep`] — One key or array index inside a change record path
//!
//! The [`access`] module reads and writes `serde_json` values by path.

pub mod access;
pub mod error;
pub mod path;
pub mod sequence;

pub use error::TypeError;
pub use path::{Path, PathStep};
pub use sequence::{IdGenerator, Sequence, UuidGenerator};
