//! # search-core
//!
//! An in-memory text search engine core: a tokenizer, an inverted index, a
//! boolean/phrase query parser with implicit-AND juxtaposition, and a
//! TF-IDF cosine ranker, wired together behind a single [`SearchEngine`]
//! facade.
//!
//! This crate has no I/O of its own — callers build a [`SearchEngine`] from
//! an in-memory document collection and get back ranked, paginated results.
//! Loading documents from disk, serving them over a network, or keeping an
//! index up to date as documents change are all left to the caller.
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use search_core::{DocId, SearchEngine};
//!
//! let mut documents = BTreeMap::new();
//! documents.insert(DocId::from("doc1"), "the quick brown fox".to_string());
//! documents.insert(DocId::from("doc2"), "the lazy dog sleeps".to_string());
//!
//! let engine = SearchEngine::new(documents).unwrap();
//! let results = engine.search("quick OR lazy", 10, 0).unwrap();
//! assert_eq!(results.len(), 2);
//! ```

pub mod config;
mod doc_id;
pub mod error;
pub mod ranking;
pub mod search;

pub use config::{EngineConfig, ResolvedEngineConfig};
pub use doc_id::DocId;
pub use error::SearchError;
pub use ranking::RankedResult;
pub use search::{Expr, InvertedIndex, SearchEngine};
