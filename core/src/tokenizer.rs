use crate::error::{Result, SearchError};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    // space, tab, LF, VT, CR
    static ref SEPARATORS: Regex = Regex::new(r"[ \t\n\x0B\r]+").expect("valid regex");
}

/// Split text on runs of whitespace, dropping empty pieces.
pub fn tokenize(text: &str) -> Vec<&str> {
    SEPARATORS.split(text).filter(|t| !t.is_empty()).collect()
}

/// A token is valid when it is non-empty, starts with an ASCII letter or a
/// non-ASCII character, and carries no control characters.
pub fn is_valid_token(token: &str) -> bool {
    match token.chars().next() {
        Some(first) if first.is_ascii_alphabetic() || !first.is_ascii() => {}
        _ => return false,
    }
    token.chars().all(|c| !c.is_ascii_control())
}

/// Case-sensitive set of terms excluded from indexing and from queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: BTreeSet<String>,
}

impl StopWordSet {
    pub fn new() -> Self { Self::default() }

    /// Tokenize `text` and validate each stop word.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_words(tokenize(text))
    }

    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        set.extend_validated(words)?;
        Ok(set)
    }

    /// Add every word or none of them.
    pub fn extend_validated<I, S>(&mut self, words: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut staged = Vec::new();
        for word in words {
            let word = word.as_ref();
            if !is_valid_token(word) {
                return Err(SearchError::InvalidToken(word.to_string()));
            }
            staged.push(word.to_string());
        }
        self.words.extend(staged);
        Ok(())
    }

    pub fn add(&mut self, term: impl Into<String>) {
        self.words.insert(term.into());
    }

    pub fn contains(&self, term: &str) -> bool { self.words.contains(term) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}
