//! Ingestion and relevance-ranked retrieval over the inverted index.

use crate::config::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::{parse_query, ParsedQuery};
use crate::store::{average_rating, DocumentRecord, DocumentStore};
use crate::tokenizer::{is_valid_token, tokenize, StopWordSet};
use crate::{DocId, DocumentStatus, ScoredDocument};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct SearchServer {
    stop_words: StopWordSet,
    index: InvertedIndex,
    documents: DocumentStore,
}

impl SearchServer {
    /// Engine with no stop words.
    pub fn new() -> Self { Self::default() }

    /// Engine whose stop words are the whitespace-separated tokens of `text`.
    pub fn with_stop_words(text: &str) -> Result<Self> {
        Ok(Self::from_stop_word_set(StopWordSet::from_text(text)?))
    }

    pub fn from_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_stop_word_set(StopWordSet::from_words(words)?))
    }

    pub fn from_stop_word_set(stop_words: StopWordSet) -> Self {
        Self { stop_words, ..Self::default() }
    }

    /// Extend the stop words. Documents already indexed keep their tokens.
    pub fn add_stop_words(&mut self, text: &str) -> Result<()> {
        self.stop_words.extend_validated(tokenize(text))
    }

    pub fn stop_words(&self) -> &StopWordSet { &self.stop_words }

    /// Index a document. On error nothing is stored.
    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        self.documents.check_new_id(id)?;

        let mut tokens = Vec::new();
        for token in tokenize(text) {
            if !is_valid_token(token) {
                return Err(SearchError::InvalidToken(token.to_string()));
            }
            if !self.stop_words.contains(token) {
                tokens.push(token.to_string());
            }
        }

        let indexed = tokens.len();
        self.documents.insert(id, DocumentRecord { status, rating: average_rating(ratings), tokens })?;
        if let Some(record) = self.documents.get(id) {
            self.index.add_document(id, &record.tokens);
        }
        debug!(id, indexed, %status, "document added");
        Ok(())
    }

    pub fn document_count(&self) -> usize { self.documents.len() }

    /// Id of the document inserted at `position` (0-based).
    pub fn document_id_at(&self, position: usize) -> Result<DocId> { self.documents.id_at(position) }

    pub fn document_status_and_tokens(&self, id: DocId) -> Result<(DocumentStatus, Vec<String>)> {
        let record = self.documents.get(id).ok_or(SearchError::UnknownDocument(id))?;
        Ok((record.status, record.tokens.clone()))
    }

    pub fn parse_query(&self, raw_query: &str) -> Result<ParsedQuery> {
        parse_query(raw_query, &self.stop_words)
    }

    /// Top hits among `Actual` documents.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with(raw_query, |_, doc_status, _| doc_status == status)
    }

    /// Top hits among documents accepted by `predicate(id, status, rating)`.
    pub fn find_top_documents_with<F>(&self, raw_query: &str, predicate: F) -> Result<Vec<ScoredDocument>>
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = self.parse_query(raw_query)?;
        let mut matched = self.find_all_documents(&query, predicate);
        sort_by_relevance(&mut matched);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    fn find_all_documents<F>(&self, query: &ParsedQuery, predicate: F) -> Vec<ScoredDocument>
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let total = self.documents.len() as f64;
        let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();

        for term in &query.plus_terms {
            let Some(postings) = self.index.postings(term) else { continue };
            let idf = (total / postings.len() as f64).ln();
            for (&id, &tf) in postings {
                let Some(record) = self.documents.get(id) else { continue };
                if predicate(id, record.status, record.rating) {
                    *relevance.entry(id).or_insert(0.0) += tf * idf;
                }
            }
        }

        for term in &query.minus_terms {
            if let Some(postings) = self.index.postings(term) {
                for id in postings.keys() {
                    relevance.remove(id);
                }
            }
        }

        debug!(
            plus = query.plus_terms.len(),
            minus = query.minus_terms.len(),
            hits = relevance.len(),
            "query evaluated"
        );

        relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.documents.get(id).map(|record| ScoredDocument { id, relevance, rating: record.rating })
            })
            .collect()
    }

    /// Plus terms of the query found in document `id`, or nothing when any
    /// minus term is found there.
    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let record = self.documents.get(id).ok_or(SearchError::UnknownDocument(id))?;

        if query.minus_terms.iter().any(|term| self.index.contains(term, id)) {
            return Ok((Vec::new(), record.status));
        }
        let matched = query
            .plus_terms
            .iter()
            .filter(|term| self.index.contains(term, id))
            .cloned()
            .collect();
        Ok((matched, record.status))
    }
}

/// Descending relevance; near-equal neighbours ordered by descending rating.
fn sort_by_relevance(docs: &mut [ScoredDocument]) {
    docs.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    for run in docs.chunk_by_mut(|a, b| (a.relevance - b.relevance).abs() < RELEVANCE_EPSILON) {
        run.sort_by(|a, b| b.rating.cmp(&a.rating));
    }
}
