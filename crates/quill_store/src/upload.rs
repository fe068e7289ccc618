//! Interface to the image upload collaborator. The transport lives
//! outside this crate; only the validated request shape and the
//! progress/result contract are defined here.

use async_trait::async_trait;

use crate::error::UploadError;

pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_UPLOAD_FOLDER: &str = "journal-images";

const ALLOWED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: String,
    pub bytes: u64,
    pub folder: String,
}

impl UploadRequest {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: u64,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
            folder: DEFAULT_UPLOAD_FOLDER.to_string(),
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }
}

pub fn validate_upload(request: &UploadRequest) -> Result<(), UploadError> {
    if request.file_name.is_empty() || request.bytes == 0 {
        return Err(UploadError::NoFile);
    }
    if !ALLOWED_TYPES.contains(&request.content_type.as_str()) {
        return Err(UploadError::UnsupportedType(request.content_type.clone()));
    }
    if request.bytes > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size: request.bytes,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Upload collaborator: streams progress as a 0-100 integer and
/// resolves to the public URL of the stored image.
#[async_trait]
pub trait ImageUpload: Send + Sync {
    async fn upload(
        &self,
        request: UploadRequest,
        on_progress: Option<Box<dyn Fn(u8) + Send + Sync>>,
    ) -> Result<String, UploadError>;
}
