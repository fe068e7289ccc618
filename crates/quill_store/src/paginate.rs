use quill_core::model::Entry;
use quill_core::time::normalize_entry;
use quill_core::visibility::Scope;

use crate::error::StoreError;
use crate::store::{Cursor, EntryStore, Order, PageQuery};

/// One fetched page. `raw_len` counts the documents the store returned,
/// before any normalization skips, and is what `has_more` derives from.
#[derive(Debug)]
pub struct FetchedPage {
    pub entries: Vec<Entry>,
    pub next_cursor: Option<Cursor>,
    pub raw_len: usize,
}

/// A pagination session against one store and scope. Holds the sticky
/// degraded-mode flag, so independent sessions (say an owner view and a
/// public view) never share fallback state.
pub struct PageSession<'a, S: EntryStore + ?Sized> {
    store: &'a S,
    scope: Scope,
    index_available: bool,
}

impl<'a, S: EntryStore + ?Sized> PageSession<'a, S> {
    pub fn new(store: &'a S, scope: Scope) -> Self {
        Self {
            store,
            scope,
            index_available: true,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// False once the session has fallen back to unordered queries.
    pub fn index_available(&self) -> bool {
        self.index_available
    }

    /// Fetches one page, newest first while the backend's sort index
    /// holds up. The first missing-index failure flips the session to
    /// the unordered query shape for good; the same logical page is
    /// retried immediately and the caller never sees the failure.
    pub async fn fetch_page(
        &mut self,
        page_size: usize,
        cursor: Option<&Cursor>,
    ) -> Result<FetchedPage, StoreError> {
        let raw = if self.index_available {
            let ordered = self.query(Order::CreatedDesc, page_size, cursor);
            match self.store.query_page(&ordered).await {
                Ok(docs) => docs,
                Err(StoreError::MissingIndex(detail)) => {
                    tracing::warn!(
                        detail = %detail,
                        "ordered entry query unavailable; dropping sort for this session"
                    );
                    self.index_available = false;
                    let degraded = self.query(Order::Unordered, page_size, cursor);
                    self.store.query_page(&degraded).await?
                }
                Err(err) => return Err(err),
            }
        } else {
            let degraded = self.query(Order::Unordered, page_size, cursor);
            self.store.query_page(&degraded).await?
        };

        let raw_len = raw.len();
        let next_cursor = raw.last().map(|doc| Cursor::new(doc.id.clone()));
        let mut entries = Vec::with_capacity(raw_len);
        for doc in raw {
            match normalize_entry(&doc.id, doc.record) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    tracing::warn!(id = %doc.id, error = %err, "skipping entry with unusable timestamps");
                }
            }
        }
        tracing::debug!(
            count = raw_len,
            degraded = !self.index_available,
            "fetched entry page"
        );
        Ok(FetchedPage {
            entries,
            next_cursor,
            raw_len,
        })
    }

    fn query(&self, order: Order, limit: usize, after: Option<&Cursor>) -> PageQuery {
        PageQuery {
            scope: self.scope.clone(),
            order,
            limit,
            after: after.cloned(),
        }
    }
}

/// Caller-held accumulation across pages. Entries only ever get
/// appended; the cursor is replaced wholesale after each page.
#[derive(Debug)]
pub struct PaginationState {
    pub entries: Vec<Entry>,
    pub cursor: Option<Cursor>,
    pub has_more: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginationState {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            has_more: true,
        }
    }

    /// Folds a fetched page into the accumulated state. A degraded-mode
    /// page can overlap an earlier ordered one, so ids already present
    /// are skipped. `has_more` stays true for an exactly-full page even
    /// when it happens to be the last one; the next fetch comes back
    /// empty and clears it.
    pub fn absorb(&mut self, page: FetchedPage, page_size: usize) {
        self.has_more = page.raw_len == page_size && page_size > 0;
        self.cursor = page.next_cursor;
        for entry in page.entries {
            if !self.entries.iter().any(|seen| seen.id == entry.id) {
                self.entries.push(entry);
            }
        }
    }
}
