pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use std::path::Path;
use std::sync::Arc;

use axum::body::Bytes;

/// PDF served for mocks flagged `is_pdf` when no override is configured.
pub const BUNDLED_PDF: &[u8] = include_bytes!("../assets/mock.pdf");

/// Shared application state passed to all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn store::MockStore>,
    pub config: config::AppConfig,
    pub pdf: Bytes,
}

impl AppState {
    pub fn new(store: Arc<dyn store::MockStore>, config: config::AppConfig, pdf: Bytes) -> Self {
        Self { store, config, pdf }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("pdf_len", &self.pdf.len())
            .finish_non_exhaustive()
    }
}

/// Load the PDF resource from `path`, or fall back to the bundled one.
pub fn load_pdf(path: Option<&Path>) -> std::io::Result<Bytes> {
    match path {
        Some(path) => std::fs::read(path).map(Bytes::from),
        None => Ok(Bytes::from_static(BUNDLED_PDF)),
    }
}
