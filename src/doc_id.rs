//! The document identifier type shared by every component of the core.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// An opaque document identifier, supplied by the caller at construction
/// time and returned unchanged in search results.
///
/// `DocId` is cheap to clone and orders lexicographically, which is what
/// gives the ranker's `(-score, doc_id)` tie-break and the pure-negation
/// fallback's "lexicographically sorted ids" behavior a well-defined order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Borrows the identifier as a plain string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocId {
    fn from(s: String) -> Self {
        DocId(s)
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        DocId(s.to_string())
    }
}

impl Deref for DocId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DocId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
