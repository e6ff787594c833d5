//! API route configuration.

use crate::api::handlers::{
    delete_link_handler, expired_handler, resolve_handler, search_handler, shorten_handler,
    stats_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// All link routes.
///
/// # Endpoints
///
/// - `POST   /links/shorten`       - Create a short link
/// - `GET    /links?short_link=`   - Resolve a code (307 redirect)
/// - `GET    /links/search`        - Reverse lookup by long URL
/// - `GET    /links/expired`       - List expired-but-undeleted links
/// - `GET    /links/{code}/stats`  - Usage statistics
/// - `PUT    /links/{code}`        - Repoint a link (owner only)
/// - `DELETE /links/{code}`        - Delete a link (owner only)
///
/// Static segments (`shorten`, `search`, `expired`) take precedence over
/// the `{code}` capture, so those names are effectively reserved.
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(resolve_handler))
        .route("/links/shorten", post(shorten_handler))
        .route("/links/search", get(search_handler))
        .route("/links/expired", get(expired_handler))
        .route("/links/{code}/stats", get(stats_handler))
        .route(
            "/links/{code}",
            put(update_link_handler).delete(delete_link_handler),
        )
}
