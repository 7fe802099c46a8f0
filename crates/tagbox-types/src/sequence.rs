use std::fmt;

use serde::{Deserialize, Serialize};

/// Correlation identifier assigned to a box when it is created.
///
/// A box derived from another box for a new interaction round inherits the
/// original's sequence, which is how a response stays paired with its
/// request. The value is opaque: only equality is meaningful.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(String);

impl Sequence {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence({})", self.short_id())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Sequence {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Source of fresh sequences.
///
/// Implementations must hand out values that are unique with overwhelming
/// probability, including across threads. No ordering is required.
pub trait IdGenerator: Send + Sync {
    /// Produce the next identifier.
    fn next_id(&self) -> Sequence;
}

/// Default generator: the simple (hyphen-free) form of a UUID v7.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> Sequence {
        Sequence(uuid::Uuid::now_v7().simple().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn uuid_generator_produces_unique_ids() {
        let gen = UuidGenerator;
        let ids: HashSet<_> = (0..1000).map(|_| gen.next_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn uuid_generator_format() {
        let id = UuidGenerator.next_id();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn unique_across_threads() {
        let gen = Arc::new(UuidGenerator);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gen = Arc::clone(&gen);
                std::thread::spawn(move || (0..250).map(|_| gen.next_id()).collect::<Vec<_>>())
            })
            .collect();
        let mut all = HashSet::new();
        for h in handles {
            for id in h.join().unwrap() {
                assert!(all.insert(id));
            }
        }
        assert_eq!(all.len(), 1000);
    }

    #[test]
    fn short_id_truncates() {
        let seq = Sequence::new("0123456789abcdef");
        assert_eq!(seq.short_id(), "01234567");
        assert_eq!(Sequence::new("abc").short_id(), "abc");
    }

    #[test]
    fn serde_is_transparent() {
        let seq = Sequence::from("abc123");
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, "\"abc123\"");
        let parsed: Sequence = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, seq);
    }

    #[test]
    fn display_is_full_value() {
        let seq = Sequence::new("0123456789abcdef");
        assert_eq!(seq.to_string(), "0123456789abcdef");
        assert_eq!(format!("{seq:?}"), "Sequence(01234567)");
    }
}
