use crate::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Failures surfaced by the engine. Every variant leaves the engine unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Document id is negative or already indexed.
    #[error("invalid document id {0}: negative or already present")]
    InvalidId(DocId),
    /// Document text or stop-word text contains a disallowed token.
    #[error("invalid token {0:?}")]
    InvalidToken(String),
    /// Query contains a malformed minus-token or an invalid term.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("position {position} out of range for {count} documents")]
    OutOfRange { position: usize, count: usize },
    #[error("unknown document {0}")]
    UnknownDocument(DocId),
}
