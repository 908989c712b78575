use axum::routing::{get, put};
use axum::Router;

use crate::handlers::chapter;
use crate::state::AppState;

/// Routes mounted at `/chapters`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(chapter::list).post(chapter::create))
        .route("/{id}", put(chapter::update).delete(chapter::delete))
}
