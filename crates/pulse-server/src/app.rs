//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::live_reload::{self, CLIENT_SCRIPT_PATH, RELOAD_PATH};
use crate::middleware::no_cache;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new();

    if state.live_reload_enabled() {
        router = router
            .route(RELOAD_PATH, get(live_reload::reload_handler))
            .route(CLIENT_SCRIPT_PATH, get(live_reload::client_script));
    }

    // Everything else is a file
    router = router.merge(static_files::static_router(&state.root_dir));

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(no_cache::cache_control_layer())
                .layer(no_cache::pragma_layer())
                .layer(no_cache::expires_layer())
                .layer(axum::middleware::from_fn(
                    no_cache::strip_conditional_headers,
                )),
        )
        .with_state(state)
}
