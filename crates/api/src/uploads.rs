//! Local-disk storage for product images and PDFs.
//!
//! Files are written under `<root>/uploads/<kind>/` and served back by the
//! router at `/uploads`. Paths recorded in the database are the public
//! paths produced by [`catalog_core::upload::public_path`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use catalog_core::form::{FormData, UploadedFile};
use catalog_core::upload::{disk_path, public_path, stored_file_name, UploadKind};
use tokio::io::AsyncWriteExt;

use crate::error::AppResult;

/// Attempts at finding a free file name before giving up.
const MAX_NAME_ATTEMPTS: i64 = 16;

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory served at `/uploads`.
    pub fn public_dir(&self) -> PathBuf {
        self.root.join(catalog_core::upload::UPLOADS_DIR)
    }

    /// Write `file` to disk and return its public path.
    ///
    /// The name is `<millis>-<sanitised client name>`; an existing file is
    /// never overwritten, the timestamp is bumped instead.
    pub async fn save(&self, kind: UploadKind, file: &UploadedFile) -> std::io::Result<String> {
        let dir = self.root.join(kind.relative_dir());
        tokio::fs::create_dir_all(&dir).await?;

        let millis = chrono::Utc::now().timestamp_millis();
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = stored_file_name(millis + attempt, &file.file_name);
            let path = dir.join(&name);
            let handle = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(handle) => handle,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            };
            fill_new_file(handle, &path, &file.data).await?;

            tracing::debug!(
                path = %path.display(),
                bytes = file.data.len(),
                content_type = file.content_type.as_deref().unwrap_or("unknown"),
                "Stored upload"
            );
            return Ok(public_path(kind, &name));
        }

        Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free file name for '{}'", file.file_name),
        ))
    }

    /// Remove previously stored files, logging (not failing) on errors.
    pub async fn remove_all<S: AsRef<str>>(&self, public_paths: &[S]) {
        for public in public_paths {
            let public = public.as_ref();
            let Some(path) = disk_path(&self.root, public) else {
                tracing::warn!(path = public, "Refusing to remove path outside upload root");
                continue;
            };
            match tokio::fs::remove_file(&path).await {
                Ok(()) => tracing::debug!(path = %path.display(), "Removed upload"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload")
                }
            }
        }
    }
}

/// Write `data` into a freshly created file, removing it again on failure so
/// no partial upload is left without a recorded path.
async fn fill_new_file(
    mut handle: tokio::fs::File,
    path: &Path,
    data: &[u8],
) -> std::io::Result<()> {
    let written = match handle.write_all(data).await {
        Ok(()) => handle.flush().await,
        Err(e) => Err(e),
    };
    drop(handle);

    if let Err(e) = written {
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            tracing::warn!(
                path = %path.display(),
                error = %remove_err,
                "Failed to remove partial upload"
            );
        }
        return Err(e);
    }
    Ok(())
}

/// Drain a multipart body into a [`FormData`].
///
/// Parts with a file name (even an empty one) are files; all others are text.
pub async fn read_form(mut multipart: Multipart) -> AppResult<FormData> {
    let mut form = FormData::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if name.is_empty() {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        match file_name {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                form.push_file(
                    name,
                    UploadedFile {
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    },
                );
            }
            None => {
                let value = field.text().await?;
                form.push_text(name, value);
            }
        }
    }

    Ok(form)
}
