//! Handlers for the `/cards` resource.
//!
//! Cards are addressed by id for writes and by `(characterId, chapterId)`
//! for the cell lookup. `PUT` and `PATCH` share one code path; `PATCH` is
//! what the grid sends when a card is dropped on another cell.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use storygrid_core::error::CoreError;
use storygrid_core::types::EntityId;
use storygrid_db::models::card::{Card, CreateCard, UpdateCard};
use storygrid_db::repositories::CardRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// GET /api/cards
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Card>>> {
    let cards = CardRepo::list(&state.pool).await?;
    Ok(Json(cards))
}

/// GET /api/cards/{character_id}/{chapter_id}
///
/// 404 when the cell is empty.
pub async fn get_at(
    State(state): State<AppState>,
    AppPath((character_id, chapter_id)): AppPath<(EntityId, EntityId)>,
) -> AppResult<Json<Card>> {
    let card = CardRepo::find_at(&state.pool, character_id, chapter_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No card for character {character_id} in chapter {chapter_id}"
            ))
        })?;
    Ok(Json(card))
}

/// POST /api/cards
///
/// 409 if the cell already holds a card.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCard>,
) -> AppResult<(StatusCode, Json<Card>)> {
    let card = CardRepo::create(&state.pool, input).await?;
    tracing::info!(
        card_id = %card.id,
        character_id = %card.character_id,
        chapter_id = %card.chapter_id,
        "Card created",
    );
    Ok((StatusCode::CREATED, Json(card)))
}

/// PUT /api/cards/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<EntityId>,
    AppJson(input): AppJson<UpdateCard>,
) -> AppResult<Json<Card>> {
    let card = apply_update(&state, id, input).await?;
    tracing::info!(card_id = %id, "Card updated");
    Ok(Json(card))
}

/// PATCH /api/cards/{id}
///
/// Typically carries only `characterId`/`chapterId`. A drop on an occupied
/// cell is resolved by the configured move policy.
pub async fn patch(
    State(state): State<AppState>,
    AppPath(id): AppPath<EntityId>,
    AppJson(input): AppJson<UpdateCard>,
) -> AppResult<Json<Card>> {
    let card = apply_update(&state, id, input).await?;
    tracing::info!(
        card_id = %id,
        character_id = %card.character_id,
        chapter_id = %card.chapter_id,
        policy = %state.config.move_policy,
        "Card moved",
    );
    Ok(Json(card))
}

/// DELETE /api/cards/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<EntityId>,
) -> AppResult<StatusCode> {
    if CardRepo::delete(&state.pool, id).await? {
        tracing::info!(card_id = %id, "Card deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Card", id }))
    }
}

async fn apply_update(state: &AppState, id: EntityId, input: UpdateCard) -> AppResult<Card> {
    CardRepo::update(&state.pool, id, input, state.config.move_policy)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Card", id }))
}
