use quill_core::model::Entry;
use quill_core::time::normalize_entry;
use quill_core::visibility::{Scope, is_visible};

use crate::error::StoreError;
use crate::store::EntryStore;

/// Point lookup under a visibility scope. Absent documents, documents
/// outside the scope, and documents with unusable timestamps all come
/// back as `Ok(None)` so callers render a not-found state instead of
/// catching an error.
pub async fn fetch_entry<S: EntryStore + ?Sized>(
    store: &S,
    id: &str,
    scope: &Scope,
) -> Result<Option<Entry>, StoreError> {
    let Some(doc) = store.get(id).await? else {
        return Ok(None);
    };
    let entry = match normalize_entry(&doc.id, doc.record) {
        Ok(entry) => entry,
        Err(err) => {
            tracing::warn!(id = %doc.id, error = %err, "entry has unusable timestamps");
            return Ok(None);
        }
    };
    if !is_visible(&entry, scope) {
        return Ok(None);
    }
    Ok(Some(entry))
}
