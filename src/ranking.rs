//! TF-IDF cosine ranking.
//!
//! Scores are computed only over the terms that survive the caller's
//! boolean filter — the candidate set is always a subset of the union of
//! the query's positive terms' posting lists, intersected with whatever the
//! evaluator matched.

use ahash::{AHashMap, AHashSet};

use crate::search::index::InvertedIndex;
use crate::DocId;

/// One scored document, ready for sorting and slicing by the facade.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RankedResult {
    pub doc_id: DocId,
    pub score: f64,
}

/// `idf(t) = ln((N + 1) / (df(t) + 1)) + 1`.
///
/// The `+1` smoothing in both numerator and denominator keeps the score
/// finite and positive even for a term with `df(t) == N` (appears in every
/// document) or a corpus of a single document.
fn idf(document_count: usize, document_frequency: usize) -> f64 {
    let n = document_count as f64;
    let df = document_frequency as f64;
    ((n + 1.0) / (df + 1.0)).ln() + 1.0
}

/// Counts occurrences of each term in `query_terms`, preserving repeats
/// from the original query (e.g. `rust rust` contributes query_tf=2).
fn query_term_frequencies(query_terms: &[String]) -> AHashMap<&str, u32> {
    let mut counts: AHashMap<&str, u32> = AHashMap::new();
    for term in query_terms {
        *counts.entry(term.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Ranks documents by TF-IDF cosine similarity against `query_terms`.
///
/// `candidate_docs`, when present, restricts scoring to that set (this is
/// the boolean evaluator's result); when absent, every document containing
/// at least one of `query_terms` is scored. Ties break on ascending
/// `doc_id`; documents with a zero-magnitude vector (e.g. none of the
/// query's terms are in the index at all) never appear in the output.
pub fn rank_query(
    query_terms: &[String],
    index: &InvertedIndex,
    candidate_docs: Option<&AHashSet<DocId>>,
) -> Vec<RankedResult> {
    if query_terms.is_empty() {
        return Vec::new();
    }

    let document_count = index.document_count();
    let query_tf: AHashMap<&str, u32> = query_term_frequencies(query_terms)
        .into_iter()
        .filter(|(term, _)| index.document_frequency(term) > 0)
        .collect();

    let term_idf: AHashMap<&str, f64> = query_tf
        .keys()
        .map(|&term| (term, idf(document_count, index.document_frequency(term))))
        .collect();

    let query_norm: f64 = query_tf
        .iter()
        .map(|(term, &tf)| {
            let weight = tf as f64 * term_idf[term];
            weight * weight
        })
        .sum::<f64>()
        .sqrt();

    if query_norm == 0.0 {
        return Vec::new();
    }

    let candidates: AHashSet<DocId> = match candidate_docs {
        Some(set) => set.clone(),
        None => {
            let mut union = AHashSet::new();
            for &term in query_tf.keys() {
                union.extend(index.documents_with_term(term));
            }
            union
        }
    };

    let mut results: Vec<RankedResult> = candidates
        .into_iter()
        .filter_map(|doc_id| {
            let mut dot_product = 0.0;
            let mut doc_norm_sq = 0.0;

            for &term in query_tf.keys() {
                let tf = index.term_frequency(term, &doc_id);
                if tf == 0 {
                    continue;
                }
                let weight = tf as f64 * term_idf[term];
                dot_product += query_tf[term] as f64 * term_idf[term] * weight;
                doc_norm_sq += weight * weight;
            }

            if doc_norm_sq == 0.0 {
                return None;
            }

            let score = dot_product / (query_norm * doc_norm_sq.sqrt());
            Some(RankedResult { doc_id, score })
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });

    results
}
