use bytes::Bytes;

use crate::domain::value_objects::Visibility;

/// A file received from a client, e.g. one part of a multipart form
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Everything needed to register a new sprite asset
#[derive(Debug, Clone)]
pub struct SpriteUpload {
    pub name: String,
    pub files: Vec<UploadedFile>,
    /// Public URL of the animated preview; required when there are several frames
    pub animated_url: Option<String>,
    pub author_id: String,
    pub category: String,
    pub is_public: Visibility,
}
