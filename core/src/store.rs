use crate::error::{Result, SearchError};
use crate::{DocId, DocumentStatus};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub status: DocumentStatus,
    pub rating: i32,
    pub tokens: Vec<String>, // indexed tokens, stop words removed
}

/// Per-document metadata plus the ids in insertion order.
#[derive(Debug, Default, Clone)]
pub struct DocumentStore {
    records: HashMap<DocId, DocumentRecord>,
    order: Vec<DocId>,
}

/// Integer mean truncated toward zero; 0 for no ratings.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (sum / ratings.len() as i64) as i32
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    /// Fails when the id is negative or already used.
    pub fn check_new_id(&self, id: DocId) -> Result<()> {
        if id < 0 || self.records.contains_key(&id) {
            return Err(SearchError::InvalidId(id));
        }
        Ok(())
    }

    pub fn insert(&mut self, id: DocId, record: DocumentRecord) -> Result<()> {
        self.check_new_id(id)?;
        self.records.insert(id, record);
        self.order.push(id);
        Ok(())
    }

    pub fn get(&self, id: DocId) -> Option<&DocumentRecord> { self.records.get(&id) }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Id of the `position`-th inserted document.
    pub fn id_at(&self, position: usize) -> Result<DocId> {
        self.order
            .get(position)
            .copied()
            .ok_or(SearchError::OutOfRange { position, count: self.order.len() })
    }
}
