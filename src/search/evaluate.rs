//! Boolean evaluation of a parsed query against an [`InvertedIndex`].

use ahash::AHashSet;

use crate::search::index::InvertedIndex;
use crate::search::query::Expr;
use crate::DocId;

/// Evaluates `expr` against `index`, returning the set of matching document
/// ids.
///
/// `Not` is evaluated as set complement against the full document universe,
/// so `NOT x` matches every document that doesn't match `x` — including
/// documents containing none of the query's terms at all.
pub fn evaluate(expr: &Expr, index: &InvertedIndex) -> AHashSet<DocId> {
    match expr {
        Expr::Term(term) => index.documents_with_term(term),
        Expr::Phrase(terms) => phrase_matches(terms, index),
        Expr::And(left, right) => {
            let l = evaluate(left, index);
            let r = evaluate(right, index);
            l.intersection(&r).cloned().collect()
        }
        Expr::Or(left, right) => {
            let l = evaluate(left, index);
            let r = evaluate(right, index);
            l.union(&r).cloned().collect()
        }
        Expr::Not(inner) => {
            let matched = evaluate(inner, index);
            index
                .document_ids()
                .filter(|id| !matched.contains(*id))
                .cloned()
                .collect()
        }
    }
}

/// Documents where `terms` occur as consecutive token positions, in order.
fn phrase_matches(terms: &[String], index: &InvertedIndex) -> AHashSet<DocId> {
    match terms {
        [] => AHashSet::new(),
        [single] => index.documents_with_term(single),
        [first, rest @ ..] => {
            let mut candidates = index.documents_with_term(first);
            for term in rest {
                let with_term = index.documents_with_term(term);
                candidates = candidates.intersection(&with_term).cloned().collect();
                if candidates.is_empty() {
                    return candidates;
                }
            }

            candidates
                .into_iter()
                .filter(|doc| {
                    let Some(first_positions) = index.positions(first, doc) else {
                        return false;
                    };
                    first_positions.iter().any(|&start| {
                        rest.iter().enumerate().all(|(offset, term)| {
                            index
                                .positions(term, doc)
                                .is_some_and(|positions| {
                                    positions.contains(&(start + offset as u32 + 1))
                                })
                        })
                    })
                })
                .collect()
        }
    }
}

/// Collects the bag of terms that contribute positively to a match, i.e.
/// every `Term`/`Phrase` leaf reached through an even number of `Not`
/// ancestors. Repeats are preserved (a term appearing twice in the query
/// contributes twice), which is what gives the ranker its query term
/// frequency.
pub fn positive_terms(expr: &Expr) -> Vec<String> {
    let mut out = Vec::new();
    collect_positive_terms(expr, false, &mut out);
    out
}

fn collect_positive_terms(expr: &Expr, negated: bool, out: &mut Vec<String>) {
    match expr {
        Expr::Term(term) => {
            if !negated {
                out.push(term.clone());
            }
        }
        Expr::Phrase(terms) => {
            if !negated {
                out.extend(terms.iter().cloned());
            }
        }
        Expr::Not(inner) => collect_positive_terms(inner, !negated, out),
        Expr::And(left, right) | Expr::Or(left, right) => {
            collect_positive_terms(left, negated, out);
            collect_positive_terms(right, negated, out);
        }
    }
}
