//! Configuration for the search core.
//!
//! Three tiers, resolved in order: explicit values passed to
//! [`EngineConfig`], then environment variable overrides, then hard
//! defaults. This mirrors the layered resolution of a full settings file
//! without needing one — the engine has exactly three knobs, all of which
//! are resource bounds rather than behavior switches.

use std::env;

/// Caller-supplied configuration. Every field is optional; an absent field
/// falls through to its environment variable, then to its hard default.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub default_limit: Option<usize>,
    pub max_query_len: Option<usize>,
    pub max_documents: Option<usize>,
}

/// Fully resolved configuration, ready to be read by the rest of the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEngineConfig {
    /// The `limit` [`crate::SearchEngine::search`] uses when a caller asks
    /// for the facade's convenience default rather than specifying one.
    pub default_limit: usize,
    /// Query strings longer than this are rejected with
    /// [`crate::SearchError::InvalidArgument`] before parsing is attempted.
    pub max_query_len: usize,
    /// The document collection a [`crate::SearchEngine`] is built from must
    /// not exceed this many documents.
    pub max_documents: usize,
}

const DEFAULT_LIMIT: usize = 10;
const DEFAULT_MAX_QUERY_LEN: usize = 4096;
const DEFAULT_MAX_DOCUMENTS: usize = 100_000;

impl Default for ResolvedEngineConfig {
    fn default() -> Self {
        ResolvedEngineConfig {
            default_limit: DEFAULT_LIMIT,
            max_query_len: DEFAULT_MAX_QUERY_LEN,
            max_documents: DEFAULT_MAX_DOCUMENTS,
        }
    }
}

impl EngineConfig {
    /// Resolves this configuration, applying environment variable overrides
    /// to any field left unset.
    pub fn resolve(&self) -> ResolvedEngineConfig {
        let defaults = ResolvedEngineConfig::default();

        ResolvedEngineConfig {
            default_limit: self
                .default_limit
                .or_else(|| env_usize("SEARCH_ENGINE_DEFAULT_LIMIT"))
                .unwrap_or(defaults.default_limit),
            max_query_len: self
                .max_query_len
                .or_else(|| env_usize("SEARCH_ENGINE_MAX_QUERY_LEN"))
                .unwrap_or(defaults.max_query_len),
            max_documents: self
                .max_documents
                .or_else(|| env_usize("SEARCH_ENGINE_MAX_DOCUMENTS"))
                .unwrap_or(defaults.max_documents),
        }
    }
}

fn env_usize(key: &str) -> Option<usize> {
    match env::var(key) {
        Ok(val) => match val.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!(key, value = %val, "ignoring unparsable environment override");
                None
            }
        },
        Err(_) => None,
    }
}
