use std::collections::BTreeMap;
use std::collections::HashSet;

use search_core::{DocId, SearchEngine, SearchError};

fn engine(pairs: &[(&str, &str)]) -> SearchEngine {
    let docs: BTreeMap<DocId, String> = pairs
        .iter()
        .map(|(id, text)| (DocId::from(*id), text.to_string()))
        .collect();
    SearchEngine::new(docs).unwrap()
}

fn doc_ids(results: &[(search_core::RankedResult, String)]) -> HashSet<DocId> {
    results.iter().map(|(r, _)| r.doc_id.clone()).collect()
}

#[test]
fn ranks_the_more_relevant_document_first() {
    let e = engine(&[
        ("a", "python fastapi api"),
        ("b", "relational database postgres sql"),
    ]);
    let results = e.search("fastapi api", 2, 0).unwrap();

    assert!(!results.is_empty());
    assert_eq!(results[0].0.doc_id, DocId::from("a"));
}

#[test]
fn phrase_query_matches_only_adjacent_terms() {
    let e = engine(&[
        ("a", "fast api is great"),
        ("b", "fast and reliable api"),
    ]);
    let results = e.search("\"fast api\"", 10, 0).unwrap();
    let ids = doc_ids(&results);

    assert!(ids.contains(&DocId::from("a")));
    assert!(!ids.contains(&DocId::from("b")));
}

#[test]
fn boolean_and_or_not_and_precedence() {
    let e = engine(&[("a", "fast api"), ("b", "fast"), ("c", "api")]);

    let and_docs = doc_ids(&e.search("fast AND api", 10, 0).unwrap());
    assert_eq!(and_docs, [DocId::from("a")].into_iter().collect());

    let or_docs = doc_ids(&e.search("fast OR api", 10, 0).unwrap());
    assert_eq!(
        or_docs,
        [DocId::from("a"), DocId::from("b"), DocId::from("c")]
            .into_iter()
            .collect()
    );

    let not_docs = doc_ids(&e.search("NOT fast", 10, 0).unwrap());
    assert!(!not_docs.contains(&DocId::from("b")));
    assert!(not_docs.contains(&DocId::from("c")));

    // Precedence is NOT > AND > OR: "fast OR api AND NOT fast" parses as
    // "fast OR (api AND (NOT fast))". The second branch matches only "c";
    // OR-ing in "fast" adds back "a" and "b".
    let prec_docs = doc_ids(&e.search("fast OR api AND NOT fast", 10, 0).unwrap());
    assert_eq!(
        prec_docs,
        [DocId::from("a"), DocId::from("b"), DocId::from("c")]
            .into_iter()
            .collect()
    );
}

#[test]
fn implicit_and_matches_only_documents_with_both_terms() {
    let e = engine(&[("a", "fast api"), ("b", "fast")]);
    let docs = doc_ids(&e.search("fast api", 10, 0).unwrap());
    assert_eq!(docs, [DocId::from("a")].into_iter().collect());
}

#[test]
fn offset_paginates_through_ranked_results() {
    let e = engine(&[("a", "api api api"), ("b", "api api"), ("c", "api")]);

    let all_results = e.search("api", 10, 0).unwrap();
    let page = e.search("api", 1, 1).unwrap();

    assert!(all_results.len() >= 2);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].0.doc_id, all_results[1].0.doc_id);
}

#[test]
fn negative_offset_or_limit_is_rejected() {
    let e = engine(&[("a", "api")]);
    assert!(matches!(
        e.search_signed("api", -1, 0),
        Err(SearchError::InvalidArgument(_))
    ));
    assert!(matches!(
        e.search_signed("api", 10, -1),
        Err(SearchError::InvalidArgument(_))
    ));
}

#[test]
fn empty_document_collection_is_rejected_at_construction() {
    let result = SearchEngine::new(BTreeMap::new());
    assert!(matches!(result, Err(SearchError::MissingCorpus(_))));
}
