//! Static file serving.
//!
//! Every path that is not a live reload endpoint is answered from the served
//! directory by `tower-http`'s `ServeDir`, which owns MIME detection,
//! directory index files, and rejection of path traversal.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Create router serving files from `root_dir`.
pub(crate) fn static_router(root_dir: &Path) -> Router<Arc<AppState>> {
    let serve_dir = ServeDir::new(root_dir).append_index_html_on_directories(true);

    Router::new().fallback_service(serve_dir)
}
