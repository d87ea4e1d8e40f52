// Request context threaded through to validators

use bytes::Bytes;
use std::collections::HashMap;
use std::path::Path;

/// A file uploaded alongside the attribute bag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name
    pub filename: String,

    /// Client-supplied media type, if any
    pub media_type: Option<String>,

    /// File contents
    pub content: Bytes,
}

impl UploadedFile {
    /// Create an upload from a name and its contents
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            media_type: None,
            content: content.into(),
        }
    }

    /// Set the declared media type
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Read an upload from disk
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(filename, content))
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Lower-cased file extension
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    /// Declared media type, falling back to a guess from the file name
    pub fn mime_type(&self) -> String {
        match &self.media_type {
            Some(media_type) => media_type.to_lowercase(),
            None => mime_guess::from_path(&self.filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        }
    }
}

/// Per-request data that validators may consult.
///
/// The engine never inspects it. Upload validators read files from it; custom
/// validators and callbacks can read the string data.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    files: HashMap<String, UploadedFile>,
    data: HashMap<String, String>,
}

impl RequestContext {
    /// Create an empty request context
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an uploaded file under a field name
    pub fn with_file(mut self, field: impl Into<String>, file: UploadedFile) -> Self {
        self.files.insert(field.into(), file);
        self
    }

    /// Add context data
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Get the file uploaded under a field name
    pub fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.files.get(field)
    }

    /// Get context data
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|s| s.as_str())
    }
}
