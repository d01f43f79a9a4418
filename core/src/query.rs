use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_token, tokenize, StopWordSet};
use std::collections::BTreeSet;

/// Distinct plus and minus terms of a query, stop words removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub plus_terms: BTreeSet<String>,
    pub minus_terms: BTreeSet<String>,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.plus_terms.is_empty() && self.minus_terms.is_empty()
    }
}

struct QueryTerm<'a> {
    text: &'a str,
    is_minus: bool,
}

fn parse_term(token: &str) -> Result<QueryTerm<'_>> {
    let (text, is_minus) = match token.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    if text.is_empty() {
        return Err(SearchError::InvalidQuery(format!("minus token {token:?} has no term")));
    }
    if !is_valid_token(text) {
        return Err(SearchError::InvalidQuery(format!("invalid term {token:?}")));
    }
    Ok(QueryTerm { text, is_minus })
}

/// Parse raw query text. Terms prefixed with `-` exclude documents.
pub fn parse_query(raw_query: &str, stop_words: &StopWordSet) -> Result<ParsedQuery> {
    let mut query = ParsedQuery::default();
    for token in tokenize(raw_query) {
        let term = parse_term(token)?;
        if stop_words.contains(term.text) {
            continue;
        }
        if term.is_minus {
            query.minus_terms.insert(term.text.to_string());
        } else {
            query.plus_terms.insert(term.text.to_string());
        }
    }
    Ok(query)
}
