//! In-memory model of a submitted `multipart/form-data` body.
//!
//! Multipart bodies arrive as a stream, but the product form is addressed by
//! key (`descriptions[2][title]`, `pdfs[0][file]`), so handlers first drain
//! the stream into a [`FormData`] and then read it by name.

/// A file part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name, unsanitised.
    pub file_name: String,
    /// As declared by the client; not checked against the contents.
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Browsers submit an empty part for a file input left blank.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Text and file parts of a form, in submission order.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    texts: Vec<(String, String)>,
    files: Vec<(String, UploadedFile)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.texts.push((name.into(), value.into()));
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        self.files.push((name.into(), file));
    }

    /// First text value submitted under `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every text value submitted under `name`.
    pub fn texts<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.texts
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First file submitted under `name`, if it has any content.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files
            .iter()
            .find(|(key, file)| key == name && !file.is_empty())
            .map(|(_, file)| file)
    }

    /// Whether any part (text or file) was submitted under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.texts.iter().any(|(key, _)| key == name)
            || self.files.iter().any(|(key, _)| key == name)
    }

    /// Whether any part name starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.texts.iter().any(|(key, _)| key.starts_with(prefix))
            || self.files.iter().any(|(key, _)| key.starts_with(prefix))
    }
}
