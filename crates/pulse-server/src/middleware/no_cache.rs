//! Cache suppression.
//!
//! Served files change while the developer works, so nothing may be cached
//! and no request may be answered with `304 Not Modified`:
//! - conditional request headers are removed before routing
//! - every response forbids caching via `Cache-Control`; handlers that set
//!   their own value (the reload stream's `no-cache`) keep it
//! - every response carries `Pragma: no-cache` and `Expires: 0`

use axum::extract::Request;
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::set_header::SetResponseHeaderLayer;

/// Default `Cache-Control` value.
const NO_STORE: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// Drop conditional request headers so every request gets a full response.
pub(crate) async fn strip_conditional_headers(mut req: Request, next: Next) -> Response {
    let headers = req.headers_mut();
    headers.remove(header::IF_MODIFIED_SINCE);
    headers.remove(header::IF_NONE_MATCH);
    next.run(req).await
}

/// Create layer that forbids caching of responses without a `Cache-Control`.
pub(crate) fn cache_control_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE))
}

/// Create layer that adds `Pragma: no-cache`.
pub(crate) fn pragma_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::PRAGMA, HeaderValue::from_static("no-cache"))
}

/// Create layer that adds `Expires: 0`.
pub(crate) fn expires_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::EXPIRES, HeaderValue::from_static("0"))
}
