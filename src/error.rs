//! Error types surfaced by the search core.
//!
//! Every fallible public operation returns `Result<_, SearchError>`. Nothing
//! in this crate panics on malformed caller input; invariant violations that
//! indicate a bug in the core itself are guarded with `debug_assert!` at the
//! call site instead of being wrapped into an error variant.

/// The three error kinds the search core can surface.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum SearchError {
    /// The query string failed to parse, or parsed to an empty primary.
    #[error("malformed query: {0}")]
    MalformedQuery(String),

    /// A caller passed a negative offset/limit, or a resource bound was exceeded.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The document collaborator supplied no documents at construction time.
    #[error("missing corpus: {0}")]
    MissingCorpus(String),
}
