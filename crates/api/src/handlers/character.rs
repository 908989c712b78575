//! Handlers for the `/characters` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use storygrid_core::error::CoreError;
use storygrid_core::types::EntityId;
use storygrid_db::models::character::{Character, CreateCharacter, UpdateCharacter};
use storygrid_db::repositories::CharacterRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// GET /api/characters
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Character>>> {
    let characters = CharacterRepo::list(&state.pool).await?;
    Ok(Json(characters))
}

/// POST /api/characters
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCharacter>,
) -> AppResult<(StatusCode, Json<Character>)> {
    let character = CharacterRepo::create(&state.pool, input).await?;
    tracing::info!(
        character_id = %character.id,
        name = %character.name,
        order = %character.sort_order,
        "Character created",
    );
    Ok((StatusCode::CREATED, Json(character)))
}

/// PUT /api/characters/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<EntityId>,
    AppJson(input): AppJson<UpdateCharacter>,
) -> AppResult<Json<Character>> {
    let character = CharacterRepo::update(&state.pool, id, input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    tracing::info!(character_id = %id, "Character updated");
    Ok(Json(character))
}

/// DELETE /api/characters/{id}
///
/// Removes every card in the character's row in the same transaction.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<EntityId>,
) -> AppResult<StatusCode> {
    match CharacterRepo::delete(&state.pool, id).await? {
        Some(cards_removed) => {
            tracing::info!(character_id = %id, cards_removed, "Character deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        })),
    }
}
