//! Tokenization: the single pure function every other component is built on.
//!
//! The indexer and the query parser both call [`tokenize`] so that a term
//! indexed from document text and a term parsed out of a query string are
//! normalized identically. Keep this function boring: no stemming, no stop
//! words, no locale awareness. Those are legitimate features for a ranking
//! layer to add on top, but they are not part of the tokenization contract
//! this core guarantees.

/// Lowercases `text` and extracts every maximal run of ASCII letters and
/// digits, in order of appearance. Everything else — whitespace,
/// punctuation, non-ASCII characters — is a separator that emits nothing.
///
/// Stable and total: the same input always produces the same output, no
/// term is ever empty, and terms are never deduplicated or reordered.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        let mut lowered = ch.to_lowercase();
        // `char::to_lowercase` can yield more than one char for some
        // non-ASCII letters; we only ever keep ASCII alphanumerics, so it's
        // enough to test the first lowered scalar.
        match lowered.next() {
            Some(lc) if lc.is_ascii_alphanumeric() => current.push(lc),
            _ => {
                if !current.is_empty() {
                    terms.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        terms.push(current);
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_whitespace() {
        assert_eq!(
            tokenize("Hello, World! foo_bar baz-99"),
            vec!["hello", "world", "foo", "bar", "baz", "99"]
        );
    }

    #[test]
    fn lowercases() {
        assert_eq!(tokenize("FastAPI"), vec!["fastapi"]);
    }

    #[test]
    fn empty_input_yields_no_terms() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ...   ---   ").is_empty());
    }

    #[test]
    fn non_ascii_is_a_separator() {
        assert_eq!(tokenize("café noir"), vec!["caf", "noir"]);
    }

    #[test]
    fn no_deduplication_order_preserved() {
        assert_eq!(tokenize("api api api"), vec!["api", "api", "api"]);
    }

    #[test]
    fn idempotent_on_its_own_rejoined_output() {
        let text = "The Quick Brown Fox Jumps 42 Times";
        let once = tokenize(text);
        let twice = tokenize(&once.join(" "));
        assert_eq!(once, twice);
    }

    proptest::proptest! {
        #[test]
        fn idempotent_under_rejoin(words in proptest::collection::vec("[a-z0-9]{1,8}", 0..16)) {
            let joined = words.join(" ");
            let once = tokenize(&joined);
            let twice = tokenize(&once.join(" "));
            proptest::prop_assert_eq!(once, twice);
        }

        #[test]
        fn never_produces_empty_terms(s in ".{0,64}") {
            for term in tokenize(&s) {
                proptest::prop_assert!(!term.is_empty());
            }
        }
    }
}
