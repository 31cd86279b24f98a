//! The search pipeline: tokenize → index → parse → evaluate → rank.

pub mod evaluate;
pub mod index;
pub mod query;
pub mod tokenization;

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::config::ResolvedEngineConfig;
use crate::error::SearchError;
use crate::ranking::{rank_query, RankedResult};
use crate::DocId;

pub use index::InvertedIndex;
pub use query::Expr;

/// A self-contained, immutable search engine over a fixed document
/// collection.
///
/// Construction tokenizes and indexes every document once; `search` is a
/// pure read over that index and can be called concurrently from multiple
/// threads without synchronization — share one `SearchEngine` behind an
/// `Arc` rather than constructing a new one per query.
pub struct SearchEngine {
    index: InvertedIndex,
    documents: BTreeMap<DocId, String>,
    config: ResolvedEngineConfig,
}

impl SearchEngine {
    /// Builds an engine over `documents`. Fails with
    /// [`SearchError::MissingCorpus`] if `documents` is empty, and with
    /// [`SearchError::InvalidArgument`] if it exceeds the configured
    /// `max_documents` bound.
    pub fn new(documents: BTreeMap<DocId, String>) -> Result<Self, SearchError> {
        Self::with_config(documents, ResolvedEngineConfig::default())
    }

    /// As [`SearchEngine::new`], but with an explicitly resolved
    /// configuration instead of the hard defaults.
    pub fn with_config(
        documents: BTreeMap<DocId, String>,
        config: ResolvedEngineConfig,
    ) -> Result<Self, SearchError> {
        if documents.is_empty() {
            return Err(SearchError::MissingCorpus(
                "no documents were supplied".to_string(),
            ));
        }
        if documents.len() > config.max_documents {
            return Err(SearchError::InvalidArgument(format!(
                "corpus has {} documents, exceeding the configured maximum of {}",
                documents.len(),
                config.max_documents
            )));
        }

        let index = index::build_index(&documents, tokenization::tokenize);
        debug!(
            document_count = index.document_count(),
            "built inverted index"
        );

        Ok(SearchEngine {
            index,
            documents,
            config,
        })
    }

    /// Runs `query` against the corpus, returning up to `limit` results
    /// starting at `offset`, each paired with its original document text.
    ///
    /// Results are ordered by descending score, ties broken by ascending
    /// document id. A query with no positive terms (e.g. a bare `NOT x`)
    /// matches every document `x` doesn't, and those are returned in
    /// lexicographic document-id order with a score of `0.0` rather than
    /// being ranked — there is nothing to rank a negation's matches by.
    #[instrument(skip(self))]
    pub fn search(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<(RankedResult, String)>, SearchError> {
        if query.len() > self.config.max_query_len {
            return Err(SearchError::InvalidArgument(format!(
                "query of {} bytes exceeds the configured maximum of {}",
                query.len(),
                self.config.max_query_len
            )));
        }

        let ast = query::parse_query(query, tokenization::tokenize)?;
        let matched = evaluate::evaluate(&ast, &self.index);
        let positive = evaluate::positive_terms(&ast);

        let ranked = if positive.is_empty() {
            let mut ids: Vec<&DocId> = matched.iter().collect();
            ids.sort();
            ids.into_iter()
                .map(|doc_id| RankedResult {
                    doc_id: doc_id.clone(),
                    score: 0.0,
                })
                .collect()
        } else {
            rank_query(&positive, &self.index, Some(&matched))
        };

        debug!(result_count = ranked.len(), "ranked query results");

        Ok(self.attach_text_and_slice(ranked, limit, offset))
    }

    /// As [`SearchEngine::search`], but accepts signed `limit`/`offset` for
    /// callers whose inputs arrive as plain integers (e.g. a CLI or an RPC
    /// boundary) rather than already-validated `usize`s. A negative value
    /// of either is [`SearchError::InvalidArgument`].
    pub fn search_signed(
        &self,
        query: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<(RankedResult, String)>, SearchError> {
        let limit = usize::try_from(limit)
            .map_err(|_| SearchError::InvalidArgument("limit must not be negative".to_string()))?;
        let offset = usize::try_from(offset).map_err(|_| {
            SearchError::InvalidArgument("offset must not be negative".to_string())
        })?;
        self.search(query, limit, offset)
    }

    /// The number of documents in the corpus.
    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    fn attach_text_and_slice(
        &self,
        ranked: Vec<RankedResult>,
        limit: usize,
        offset: usize,
    ) -> Vec<(RankedResult, String)> {
        ranked
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|result| {
                let text = self
                    .documents
                    .get(&result.doc_id)
                    .cloned()
                    .unwrap_or_default();
                (result, text)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(pairs: &[(&str, &str)]) -> SearchEngine {
        let docs: BTreeMap<DocId, String> = pairs
            .iter()
            .map(|(id, text)| (DocId::from(*id), text.to_string()))
            .collect();
        SearchEngine::new(docs).unwrap()
    }

    #[test]
    fn empty_corpus_is_missing_corpus_error() {
        assert!(matches!(
            SearchEngine::new(BTreeMap::new()),
            Err(SearchError::MissingCorpus(_))
        ));
    }

    #[test]
    fn search_returns_ranked_results_with_text() {
        let e = engine(&[("d1", "rust search engine"), ("d2", "python tutorial")]);
        let results = e.search("rust", 10, 0).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0.doc_id, DocId::from("d1"));
        assert_eq!(results[0].1, "rust search engine");
    }

    #[test]
    fn limit_and_offset_slice_the_ranked_list() {
        let e = engine(&[
            ("d1", "rust rust rust"),
            ("d2", "rust rust"),
            ("d3", "rust"),
        ]);
        let page1 = e.search("rust", 1, 0).unwrap();
        let page2 = e.search("rust", 1, 1).unwrap();
        assert_eq!(page1.len(), 1);
        assert_eq!(page2.len(), 1);
        assert_ne!(page1[0].0.doc_id, page2[0].0.doc_id);
    }

    #[test]
    fn pure_negative_query_returns_lexicographic_zero_score_matches() {
        let e = engine(&[("b", "python"), ("a", "python"), ("c", "rust")]);
        let results = e.search("NOT rust", 10, 0).unwrap();
        let ids: Vec<_> = results.iter().map(|(r, _)| r.doc_id.clone()).collect();
        assert_eq!(ids, vec![DocId::from("a"), DocId::from("b")]);
        assert!(results.iter().all(|(r, _)| r.score == 0.0));
    }

    #[test]
    fn malformed_query_is_an_error() {
        let e = engine(&[("d1", "rust")]);
        assert!(matches!(
            e.search("", 10, 0),
            Err(SearchError::MalformedQuery(_))
        ));
    }

    #[test]
    fn negative_signed_limit_is_invalid_argument() {
        let e = engine(&[("d1", "rust")]);
        assert!(matches!(
            e.search_signed("rust", -1, 0),
            Err(SearchError::InvalidArgument(_))
        ));
        assert!(matches!(
            e.search_signed("rust", 10, -1),
            Err(SearchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn query_longer_than_configured_max_is_invalid_argument() {
        let docs: BTreeMap<DocId, String> =
            [(DocId::from("d1"), "rust".to_string())].into_iter().collect();
        let config = ResolvedEngineConfig {
            max_query_len: 4,
            ..ResolvedEngineConfig::default()
        };
        let e = SearchEngine::with_config(docs, config).unwrap();
        assert!(matches!(
            e.search("rustacean", 10, 0),
            Err(SearchError::InvalidArgument(_))
        ));
    }
}
