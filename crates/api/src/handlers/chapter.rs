//! Handlers for the `/chapters` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use storygrid_core::error::CoreError;
use storygrid_core::types::EntityId;
use storygrid_db::models::chapter::{Chapter, CreateChapter, UpdateChapter};
use storygrid_db::repositories::ChapterRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// GET /api/chapters
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Chapter>>> {
    let chapters = ChapterRepo::list(&state.pool).await?;
    Ok(Json(chapters))
}

/// POST /api/chapters
///
/// `order` defaults to `count + 1` when omitted.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateChapter>,
) -> AppResult<(StatusCode, Json<Chapter>)> {
    let chapter = ChapterRepo::create(&state.pool, input).await?;
    tracing::info!(
        chapter_id = %chapter.id,
        title = %chapter.title,
        order = %chapter.sort_order,
        "Chapter created",
    );
    Ok((StatusCode::CREATED, Json(chapter)))
}

/// PUT /api/chapters/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<EntityId>,
    AppJson(input): AppJson<UpdateChapter>,
) -> AppResult<Json<Chapter>> {
    let chapter = ChapterRepo::update(&state.pool, id, input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Chapter",
            id,
        }))?;
    tracing::info!(chapter_id = %id, "Chapter updated");
    Ok(Json(chapter))
}

/// DELETE /api/chapters/{id}
///
/// Removes every card in the chapter's column in the same transaction.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<EntityId>,
) -> AppResult<StatusCode> {
    match ChapterRepo::delete(&state.pool, id).await? {
        Some(cards_removed) => {
            tracing::info!(chapter_id = %id, cards_removed, "Chapter deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Chapter",
            id,
        })),
    }
}
