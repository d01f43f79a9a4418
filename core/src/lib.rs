pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod server;
pub mod store;
pub mod tokenizer;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use error::{Result, SearchError};
pub use index::InvertedIndex;
pub use query::ParsedQuery;
pub use server::SearchServer;
pub use tokenizer::StopWordSet;

pub type DocId = i32;

/// Lifecycle status attached to every document at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentStatus::Actual => "ACTUAL",
            DocumentStatus::Irrelevant => "IRRELEVANT",
            DocumentStatus::Banned => "BANNED",
            DocumentStatus::Removed => "REMOVED",
        };
        f.write_str(name)
    }
}

/// One ranked hit returned by [`SearchServer::find_top_documents`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: DocId,
    pub relevance: f64, // summed tf-idf over plus terms
    pub rating: i32,
}

impl fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}
