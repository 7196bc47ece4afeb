//! Product image uploads.

use std::path::Path;

use reqwest::multipart::Part;

use crate::error::AdminError;

/// Image file extensions the product API accepts, with their MIME types.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
];

/// An image ready to send as the `imageFile` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read an image from disk, inferring its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for unsupported extensions or empty
    /// files, `AdminError::Io` if the file cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self, AdminError> {
        let content_type = mime_for_path(path).ok_or_else(|| {
            AdminError::invalid(format!(
                "unsupported image type: {} (expected png, jpg, jpeg, gif, webp or svg)",
                path.display()
            ))
        })?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| AdminError::invalid(format!("invalid file name: {}", path.display())))?
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        if bytes.is_empty() {
            return Err(AdminError::invalid(format!("image is empty: {file_name}")));
        }

        Ok(Self::new(file_name, content_type, bytes))
    }

    /// Multipart part carrying the image.
    ///
    /// # Errors
    ///
    /// Returns error if the content type is not a valid MIME string.
    pub fn to_part(&self) -> Result<Part, AdminError> {
        Ok(Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.content_type)?)
    }
}

/// MIME type for a supported image path, by extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, mime)| *mime)
}
