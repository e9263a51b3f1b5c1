use axum::{extract::DefaultBodyLimit, Extension, Router};
use std::path::Path;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, services::ServeDir};

use crate::{hub::SharedHub, store::BlobStore};

pub mod chat;
pub mod upload;
pub mod ws;

const BODY_LIMIT: usize = 100 * 1024 * 1024;

pub fn router() -> Router {
    Router::new()
        .merge(chat::router())
        .merge(upload::router())
        .merge(ws::router())
}

/// Full application: routes, static client fallback, shared state, limits.
pub fn app(hub: SharedHub, blobs: BlobStore, static_dir: &Path) -> Router {
    router()
        .fallback_service(ServeDir::new(static_dir))
        .layer(Extension(hub))
        .layer(Extension(blobs))
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
}
