//! Engine-wide constants.

/// Upper bound on the number of hits returned by a single query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are treated as equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;
