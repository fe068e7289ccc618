//! Asynchronous retrieval layer over the journal document store:
//! cursor pagination with a degraded-mode fallback, scoped point
//! lookups, and the upload collaborator interface.

mod error;
mod lookup;
mod memory;
mod paginate;
mod store;
mod upload;

pub use crate::error::{StoreError, UploadError};
pub use crate::lookup::fetch_entry;
pub use crate::memory::MemoryStore;
pub use crate::paginate::{FetchedPage, PageSession, PaginationState};
pub use crate::store::{Cursor, EntryStore, Order, PageQuery, StoredEntry};
pub use crate::upload::{
    DEFAULT_UPLOAD_FOLDER, ImageUpload, MAX_UPLOAD_BYTES, UploadRequest, validate_upload,
};
