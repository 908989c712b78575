use axum::routing::get;
use axum::Router;

use crate::handlers::vocabulary;
use crate::state::AppState;

/// Routes merged at the `/api` root.
///
/// ```text
/// GET /tags      -> list_tags
/// GET /colors    -> list_colors
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tags", get(vocabulary::list_tags))
        .route("/colors", get(vocabulary::list_colors))
}
