//! The inverted index: the data structure every query is ultimately
//! answered against.
//!
//! An [`InvertedIndex`] is built once from a fixed document collection and
//! never mutated afterwards. It is safe to share behind an `Arc` across
//! concurrent callers without any locking.

use std::collections::BTreeMap;

use ahash::{AHashMap, AHashSet};

use crate::DocId;

/// A postings-based inverted index over a fixed document collection.
///
/// For each term, the index tracks both a raw term frequency per document
/// (used by the ranker) and the ordered list of token positions at which
/// the term occurs in that document (used by phrase matching).
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings_tf: AHashMap<String, AHashMap<DocId, u32>>,
    postings_pos: AHashMap<String, AHashMap<DocId, Vec<u32>>>,
    doc_length: AHashMap<DocId, u32>,
}

impl InvertedIndex {
    /// The number of documents the index was built over.
    pub fn document_count(&self) -> usize {
        self.doc_length.len()
    }

    /// The number of distinct documents containing `term`, i.e. `df(term)`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings_tf.get(term).map_or(0, |m| m.len())
    }

    /// Raw term frequency of `term` within `doc`, or 0 if absent.
    pub fn term_frequency(&self, term: &str, doc: &DocId) -> u32 {
        self.postings_tf
            .get(term)
            .and_then(|m| m.get(doc))
            .copied()
            .unwrap_or(0)
    }

    /// Token positions at which `term` occurs in `doc`, if any.
    pub fn positions(&self, term: &str, doc: &DocId) -> Option<&[u32]> {
        self.postings_pos
            .get(term)
            .and_then(|m| m.get(doc))
            .map(Vec::as_slice)
    }

    /// The set of documents that contain `term` at least once.
    pub fn documents_with_term(&self, term: &str) -> AHashSet<DocId> {
        match self.postings_tf.get(term) {
            Some(m) => m.keys().cloned().collect(),
            None => AHashSet::new(),
        }
    }

    /// Total token count of `doc`, or 0 if `doc` is unknown to the index.
    pub fn doc_length(&self, doc: &DocId) -> u32 {
        self.doc_length.get(doc).copied().unwrap_or(0)
    }

    /// All document ids known to the index, in no particular order.
    pub fn document_ids(&self) -> impl Iterator<Item = &DocId> {
        self.doc_length.keys()
    }

    /// Whether `term` occurs in at least one document.
    pub fn contains_term(&self, term: &str) -> bool {
        self.postings_tf.contains_key(term)
    }
}

/// Builds an [`InvertedIndex`] over `documents`, tokenizing each document's
/// text with `tokenize`.
///
/// `documents` is a `BTreeMap` purely so that construction is deterministic
/// and easy to test; the resulting index does not depend on document
/// insertion order for any externally observable behavior.
pub fn build_index(
    documents: &BTreeMap<DocId, String>,
    tokenize: impl Fn(&str) -> Vec<String>,
) -> InvertedIndex {
    let mut postings_tf: AHashMap<String, AHashMap<DocId, u32>> = AHashMap::new();
    let mut postings_pos: AHashMap<String, AHashMap<DocId, Vec<u32>>> = AHashMap::new();
    let mut doc_length: AHashMap<DocId, u32> = AHashMap::new();

    for (doc_id, text) in documents {
        let terms = tokenize(text);
        doc_length.insert(doc_id.clone(), terms.len() as u32);

        for (position, term) in terms.into_iter().enumerate() {
            *postings_tf
                .entry(term.clone())
                .or_default()
                .entry(doc_id.clone())
                .or_insert(0) += 1;

            postings_pos
                .entry(term)
                .or_default()
                .entry(doc_id.clone())
                .or_default()
                .push(position as u32);
        }
    }

    InvertedIndex {
        postings_tf,
        postings_pos,
        doc_length,
    }
}
