use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use quill_core::model::{EntryRecord, Quote};
use quill_core::visibility::Scope;

use crate::error::StoreError;
use crate::store::{EntryStore, Order, PageQuery, StoredEntry};

/// An in-process document store: the test double for the retrieval
/// layer and the backend behind the CLI's JSON store files. Document
/// order of insertion is the store's implicit stable ordering.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    docs: Vec<StoredEntry>,
    quote: Option<Quote>,
    signed_in: Option<String>,
    configured: bool,
    ordered_index: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    #[serde(default)]
    entries: Vec<StoreFileEntry>,
    #[serde(default)]
    quote: Option<Quote>,
    #[serde(default)]
    ordered_index: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct StoreFileEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(flatten)]
    record: EntryRecord,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            docs: Vec::new(),
            quote: None,
            signed_in: None,
            configured: true,
            ordered_index: true,
        }
    }

    /// A store whose backend was never initialized; every call fails
    /// with [`StoreError::NotConfigured`].
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Drops the composite sort index, so ordered queries fail with
    /// [`StoreError::MissingIndex`].
    pub fn without_ordered_index(mut self) -> Self {
        self.ordered_index = false;
        self
    }

    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quote = Some(quote);
        self
    }

    pub fn sign_in(&mut self, uid: impl Into<String>) {
        self.signed_in = Some(uid.into());
    }

    /// Inserts a document, generating an id when none is given, and
    /// returns the id.
    pub fn insert(&mut self, id: Option<String>, record: EntryRecord) -> String {
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        self.docs.push(StoredEntry {
            id: id.clone(),
            record,
        });
        id
    }

    /// Loads a JSON store file: `{"entries": [...], "quote": {...},
    /// "orderedIndex": bool}`.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let file: StoreFile = serde_json::from_str(json)
            .map_err(|err| StoreError::Backend(format!("invalid store file: {err}")))?;
        let mut store = Self::new();
        if file.ordered_index == Some(false) {
            store.ordered_index = false;
        }
        store.quote = file.quote;
        for entry in file.entries {
            store.insert(entry.id, entry.record);
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn ensure_configured(&self) -> Result<(), StoreError> {
        if self.configured {
            Ok(())
        } else {
            Err(StoreError::NotConfigured)
        }
    }

    fn matches_scope(record: &EntryRecord, scope: &Scope) -> bool {
        match scope {
            Scope::Owner(uid) => record.owner_id == *uid,
            Scope::Published => record.is_published,
        }
    }

    fn created_sort_key(doc: &StoredEntry) -> i64 {
        doc.record
            .created_at
            .as_ref()
            .and_then(|raw| raw.to_datetime().ok())
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(i64::MIN)
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<StoredEntry>, StoreError> {
        self.ensure_configured()?;
        Ok(self.docs.iter().find(|doc| doc.id == id).cloned())
    }

    async fn query_page(&self, query: &PageQuery) -> Result<Vec<StoredEntry>, StoreError> {
        self.ensure_configured()?;
        if let Scope::Owner(uid) = &query.scope {
            if self.signed_in.as_deref() != Some(uid.as_str()) {
                return Err(StoreError::Unauthorized(
                    "you must be signed in to read journal entries".to_string(),
                ));
            }
        }

        let mut docs: Vec<StoredEntry> = self
            .docs
            .iter()
            .filter(|doc| Self::matches_scope(&doc.record, &query.scope))
            .cloned()
            .collect();

        if query.order == Order::CreatedDesc {
            if !self.ordered_index {
                return Err(StoreError::MissingIndex(
                    "entries require a composite index for scoped queries ordered by creation time"
                        .to_string(),
                ));
            }
            // Stable sort keeps insertion order for equal timestamps.
            docs.sort_by(|a, b| Self::created_sort_key(b).cmp(&Self::created_sort_key(a)));
        }

        if let Some(cursor) = &query.after {
            match docs.iter().position(|doc| doc.id == cursor.as_str()) {
                Some(position) => {
                    docs.drain(..=position);
                }
                // A cursor pointing at a vanished document ends the
                // sequence rather than restarting it.
                None => return Ok(Vec::new()),
            }
        }

        docs.truncate(query.limit);
        Ok(docs)
    }

    async fn get_quote(&self) -> Result<Option<Quote>, StoreError> {
        self.ensure_configured()?;
        Ok(self.quote.clone())
    }
}
