use axum::routing::{get, put};
use axum::Router;

use crate::handlers::card;
use crate::state::AppState;

/// Routes mounted at `/cards`.
///
/// ```text
/// GET    /                                -> list
/// POST   /                                -> create
/// PUT    /{id}                            -> update
/// PATCH  /{id}                            -> patch (move)
/// DELETE /{id}                            -> delete
/// GET    /{character_id}/{chapter_id}     -> get_at
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(card::list).post(card::create))
        .route(
            "/{id}",
            put(card::update).patch(card::patch).delete(card::delete),
        )
        .route("/{character_id}/{chapter_id}", get(card::get_at))
}
