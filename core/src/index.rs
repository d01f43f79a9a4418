//! Term → document → term-frequency map.
//!
//! Weights are `occurrences / indexed token count` of the document, so each
//! stored weight lies in (0, 1]. A term never maps to an empty document set.

use crate::DocId;
use std::collections::BTreeMap;

pub type Postings = BTreeMap<DocId, f64>;

#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Postings>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Record every token of `doc_id`. An empty token list adds nothing.
    pub fn add_document<S: AsRef<str>>(&mut self, doc_id: DocId, tokens: &[S]) {
        if tokens.is_empty() {
            return;
        }
        let inv_count = 1.0 / tokens.len() as f64;
        for token in tokens {
            *self
                .postings
                .entry(token.as_ref().to_string())
                .or_default()
                .entry(doc_id)
                .or_insert(0.0) += inv_count;
        }
    }

    /// Drop `doc_id` from every term, pruning terms left without documents.
    pub fn remove_document(&mut self, doc_id: DocId) {
        self.postings.retain(|_, docs| {
            docs.remove(&doc_id);
            !docs.is_empty()
        });
    }

    pub fn postings(&self, term: &str) -> Option<&Postings> { self.postings.get(term) }

    pub fn contains(&self, term: &str, doc_id: DocId) -> bool {
        self.postings.get(term).is_some_and(|docs| docs.contains_key(&doc_id))
    }

    pub fn term_frequency(&self, term: &str, doc_id: DocId) -> Option<f64> {
        self.postings.get(term)?.get(&doc_id).copied()
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, |docs| docs.len())
    }

    pub fn term_count(&self) -> usize { self.postings.len() }
}
