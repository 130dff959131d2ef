//! Browser script that subscribes to the reload stream.
//!
//! Pages opt in with `<script src="/__reload.js"></script>`. Besides
//! listening for reloads, the script stamps a cache key (`ts`, then
//! `__devReload` after each reload) onto the page URL and onto same-origin
//! scripts, stylesheets, manifests and page links.

use axum::http::header;
use axum::response::IntoResponse;

/// Embedded client script.
const CLIENT_SCRIPT: &str = include_str!("../../assets/reload.js");

/// Serve the live reload client script.
pub(crate) async fn client_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        CLIENT_SCRIPT,
    )
}
