//! Naming and placement of uploaded product files.
//!
//! Files live under `<upload root>/uploads/<kind dir>/` and are referenced
//! from the database by their public path `/uploads/<kind dir>/<file>`.

use std::path::{Component, Path, PathBuf};

/// URL prefix under which uploads are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Directory (relative to the upload root) that mirrors [`PUBLIC_PREFIX`].
pub const UPLOADS_DIR: &str = "uploads";

/// Fallback stem when a client file name sanitises to nothing.
const FALLBACK_NAME: &str = "upload";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ProductImage,
    Pdf,
}

impl UploadKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            UploadKind::ProductImage => "products",
            UploadKind::Pdf => "pdfs",
        }
    }

    /// Directory for this kind, relative to the upload root.
    pub fn relative_dir(self) -> PathBuf {
        Path::new(UPLOADS_DIR).join(self.dir_name())
    }
}

/// Reduce a client file name to its last path component and replace every
/// run of whitespace with a single `-`.
pub fn sanitize_file_name(original: &str) -> String {
    let last = original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let mut out = String::with_capacity(last.len());
    let mut in_space = false;
    for ch in last.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }

    if out.trim_matches('.').is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        out
    }
}

/// Name a stored file `<millis>-<sanitised name>`.
pub fn stored_file_name(timestamp_millis: i64, original: &str) -> String {
    format!("{timestamp_millis}-{}", sanitize_file_name(original))
}

/// Public path recorded in the database for a stored file.
pub fn public_path(kind: UploadKind, stored_name: &str) -> String {
    format!("{PUBLIC_PREFIX}/{}/{stored_name}", kind.dir_name())
}

/// Map a public path back to its location on disk under `root`.
///
/// Returns `None` for paths outside [`PUBLIC_PREFIX`] or containing
/// anything other than plain components.
pub fn disk_path(root: &Path, public: &str) -> Option<PathBuf> {
    let rest = public.strip_prefix(PUBLIC_PREFIX)?.strip_prefix('/')?;
    let relative = Path::new(rest);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(UPLOADS_DIR).join(relative))
}
