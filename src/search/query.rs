//! Query grammar: lexer, AST, and recursive-descent parser.
//!
//! ```text
//! Or    := And {'OR' And}
//! And   := Not {('AND' | ε) Not}      -- juxtaposition is an implicit AND
//! Not   := 'NOT' Not | Primary
//! Primary := WORD | PHRASE
//! ```
//!
//! `AND`, `OR`, and `NOT` are keywords only when they appear as bare,
//! unquoted words; `"AND"` as a phrase term is just the term `and`.

use std::iter::Peekable;
use std::str::Chars;

use tracing::trace;

use crate::error::SearchError;

/// The parsed structure of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single term, already tokenized (so already lowercased).
    Term(String),
    /// An ordered sequence of at least two terms that must occur as
    /// consecutive token positions in a document.
    Phrase(Vec<String>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Phrase(String),
    And,
    Or,
    Not,
}

fn lex(input: &str) -> Vec<Token> {
    let mut chars: Peekable<Chars> = input.chars().peekable();
    let mut tokens = Vec::new();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '"' => {
                chars.next(); // consume opening quote
                tokens.push(Token::Phrase(lex_phrase(&mut chars)));
            }
            _ => {
                let word = lex_word(&mut chars);
                if word.is_empty() {
                    // Unrecognized punctuation with no word characters attached: skip it.
                    chars.next();
                    continue;
                }
                tokens.push(match word.to_ascii_uppercase().as_str() {
                    "AND" => Token::And,
                    "OR" => Token::Or,
                    "NOT" => Token::Not,
                    _ => Token::Word(word),
                });
            }
        }
    }

    tokens
}

/// Reads the body of a quoted phrase. An unterminated quote is tolerated:
/// everything up to end-of-input becomes the phrase body, rather than being
/// treated as a lexer error.
fn lex_phrase(chars: &mut Peekable<Chars>) -> String {
    let mut buf = String::new();
    for ch in chars.by_ref() {
        if ch == '"' {
            break;
        }
        buf.push(ch);
    }
    buf
}

/// A bare word is keyword-significant only in its raw (unlowercased,
/// unsplit) form `AND`/`OR`/`NOT`; anything else is handed to the injected
/// tokenizer for normalization once the parser decides it's a `Term`. A word
/// is delimited solely by whitespace and quotes — every other character,
/// including `(`/`)`, rides along as part of the word.
fn lex_word(chars: &mut Peekable<Chars>) -> String {
    let mut buf = String::new();
    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() || ch == '"' {
            break;
        }
        buf.push(ch);
        chars.next();
    }
    buf
}

struct Parser<'a, F> {
    tokens: Vec<Token>,
    pos: usize,
    tokenize: &'a F,
}

impl<'a, F> Parser<'a, F>
where
    F: Fn(&str) -> Vec<String>,
{
    fn new(tokens: Vec<Token>, tokenize: &'a F) -> Self {
        Parser {
            tokens,
            pos: 0,
            tokenize,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.peek().cloned()?;
        self.pos += 1;
        Some(t)
    }

    fn parse_or(&mut self) -> Result<Expr, SearchError> {
        let mut left = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.next();
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, SearchError> {
        let mut left = self.parse_not()?;
        loop {
            match self.peek() {
                Some(Token::And) => {
                    self.next();
                    let right = self.parse_not()?;
                    left = Expr::And(Box::new(left), Box::new(right));
                }
                // Juxtaposition: the start of another primary implies AND.
                Some(Token::Word(_) | Token::Phrase(_) | Token::Not) => {
                    let right = self.parse_not()?;
                    left = Expr::And(Box::new(left), Box::new(right));
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, SearchError> {
        if matches!(self.peek(), Some(Token::Not)) {
            self.next();
            let inner = self.parse_not()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, SearchError> {
        match self.next() {
            Some(Token::Word(w)) => {
                let terms = (self.tokenize)(&w);
                let mut iter = terms.into_iter();
                let first = iter.next().ok_or_else(|| {
                    SearchError::MalformedQuery(format!(
                        "term '{w}' contains no indexable characters"
                    ))
                })?;
                // A bare word that tokenizes into several sub-terms (e.g.
                // "foo-bar") is an implicit AND of those sub-terms, not a
                // phrase: only quoted text gets proximity semantics.
                Ok(iter.fold(Expr::Term(first), |acc, term| {
                    Expr::And(Box::new(acc), Box::new(Expr::Term(term)))
                }))
            }
            Some(Token::Phrase(p)) => {
                let terms = (self.tokenize)(&p);
                match terms.len() {
                    0 => Err(SearchError::MalformedQuery(
                        "quoted phrase contains no indexable characters".to_string(),
                    )),
                    1 => Ok(Expr::Term(terms.into_iter().next().unwrap())),
                    _ => Ok(Expr::Phrase(terms)),
                }
            }
            Some(other) => Err(SearchError::MalformedQuery(format!(
                "unexpected token {other:?}"
            ))),
            None => Err(SearchError::MalformedQuery(
                "unexpected end of query".to_string(),
            )),
        }
    }
}

/// Parses `input` into an [`Expr`], re-tokenizing each `WORD`/`PHRASE` body
/// through `tokenize` so query terms are normalized identically to indexed
/// text. A query that is empty, whitespace-only, or made only of
/// unrecognized punctuation is a [`SearchError::MalformedQuery`].
pub fn parse_query(
    input: &str,
    tokenize: impl Fn(&str) -> Vec<String>,
) -> Result<Expr, SearchError> {
    let tokens = lex(input);
    trace!(token_count = tokens.len(), "lexed query");
    if tokens.is_empty() {
        return Err(SearchError::MalformedQuery(
            "query contains no searchable terms".to_string(),
        ));
    }

    let mut parser = Parser::new(tokens, &tokenize);
    let expr = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        return Err(SearchError::MalformedQuery(format!(
            "unexpected trailing token {:?}",
            parser.tokens[parser.pos]
        )));
    }
    Ok(expr)
}
