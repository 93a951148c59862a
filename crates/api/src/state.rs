use std::sync::Arc;

use crate::config::ServerConfig;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: catalog_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Disk storage for product images and PDFs.
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    pub fn new(pool: catalog_db::DbPool, config: ServerConfig) -> Self {
        let uploads = Arc::new(UploadStore::new(config.upload_dir.clone()));
        Self {
            pool,
            config: Arc::new(config),
            uploads,
        }
    }
}
