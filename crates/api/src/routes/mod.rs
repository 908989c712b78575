pub mod card;
pub mod chapter;
pub mod character;
pub mod health;
pub mod vocabulary;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /chapters                                   list, create
/// /chapters/{id}                              update, delete (cascades to cards)
///
/// /characters                                 list, create
/// /characters/{id}                            update, delete (cascades to cards)
///
/// /cards                                      list, create
/// /cards/{id}                                 update (PUT), move (PATCH), delete
/// /cards/{character_id}/{chapter_id}          get the card in a cell
///
/// /tags                                       card tag vocabulary
/// /colors                                     color swatches
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/chapters", chapter::router())
        .nest("/characters", character::router())
        .nest("/cards", card::router())
        .merge(vocabulary::router())
}
