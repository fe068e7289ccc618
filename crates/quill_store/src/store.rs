use async_trait::async_trait;

use quill_core::model::{EntryRecord, Quote};
use quill_core::visibility::Scope;

use crate::error::StoreError;

/// An entry document together with its store-assigned id.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub id: String,
    pub record: EntryRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Newest first by creation timestamp. Needs a composite index on
    /// the backend when combined with a scope filter.
    CreatedDesc,
    /// The store's implicit stable ordering.
    Unordered,
}

/// Opaque resume point: the last item of the previous page as the store
/// understands it. Produced by a fetch, handed back on the next one,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct PageQuery {
    pub scope: Scope,
    pub order: Order,
    pub limit: usize,
    pub after: Option<Cursor>,
}

/// The document store collaborator. Implementations must signal a
/// missing sort index via [`StoreError::MissingIndex`], distinguishable
/// from every other failure.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Point lookup by id; absent documents are `Ok(None)`.
    async fn get(&self, id: &str) -> Result<Option<StoredEntry>, StoreError>;

    /// One page of entries filtered by scope, optionally ordered,
    /// resumed after the cursor when given.
    async fn query_page(&self, query: &PageQuery) -> Result<Vec<StoredEntry>, StoreError>;

    /// The journal's quote settings document, when one exists.
    async fn get_quote(&self) -> Result<Option<Quote>, StoreError>;
}
