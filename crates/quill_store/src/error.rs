use thiserror::Error;

/// Failures surfaced by the document store. Not-found is never an
/// error; lookups return `Ok(None)` so callers render an absent state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend was never initialized. Fatal to any call, never
    /// retried.
    #[error("document store is not configured")]
    NotConfigured,
    /// The operation requires an authenticated owner. Never retried.
    #[error("operation requires an authenticated owner: {0}")]
    Unauthorized(String),
    /// The store cannot serve the requested ordering. Recovered once
    /// per pagination session by retrying without the sort clause.
    #[error("missing index for ordered query: {0}")]
    MissingIndex(String),
    /// Any other backend failure; propagates unchanged.
    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no file selected")]
    NoFile,
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("file is too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },
    #[error("network error during upload: {0}")]
    Network(String),
}
