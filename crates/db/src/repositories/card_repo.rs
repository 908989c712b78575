//! Repository for the `cards` table.
//!
//! A coordinate holds at most one card. Creates onto an occupied cell are
//! rejected; moves onto an occupied cell follow the caller's
//! [`MovePolicy`]. Both checks run inside the write transaction, and the
//! `uq_cards_coordinate` index backs them up against racing writers.

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};
use storygrid_core::error::CoreError;
use storygrid_core::grid::CellKey;
use storygrid_core::moves::{self, MovePlan, MovePolicy};
use storygrid_core::types::{new_id, EntityId};

use crate::error::StoreError;
use crate::models::card::{Card, CreateCard, UpdateCard};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, character_id, chapter_id, content, tag, color, created_at, updated_at";

/// Provides CRUD and move operations for cards.
pub struct CardRepo;

impl CardRepo {
    /// Insert a new card, returning the created row.
    ///
    /// Fails with a validation error if either coordinate does not reference
    /// an existing entity, and with a conflict if the cell is occupied.
    pub async fn create(pool: &SqlitePool, input: CreateCard) -> Result<Card, StoreError> {
        let input = input.normalize()?;
        let cell = input.cell();
        let mut tx = pool.begin().await?;

        ensure_cell_exists(&mut tx, cell).await?;
        if let Some(existing) = Self::find_at(&mut *tx, cell.character_id, cell.chapter_id).await?
        {
            return Err(CoreError::Conflict(format!(
                "Cell ({}, {}) already holds card {}",
                cell.character_id, cell.chapter_id, existing.id
            ))
            .into());
        }

        let query = format!(
            "INSERT INTO cards (id, character_id, chapter_id, content, tag, color, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {COLUMNS}"
        );
        let card = sqlx::query_as::<_, Card>(&query)
            .bind(new_id())
            .bind(cell.character_id)
            .bind(cell.chapter_id)
            .bind(&input.content)
            .bind(&input.tag)
            .bind(&input.color)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(card)
    }

    /// Find a card by id.
    pub async fn find_by_id<'e, E>(executor: E, id: EntityId) -> Result<Option<Card>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = $1");
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find the card at a grid coordinate.
    pub async fn find_at<'e, E>(
        executor: E,
        character_id: EntityId,
        chapter_id: EntityId,
    ) -> Result<Option<Card>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query =
            format!("SELECT {COLUMNS} FROM cards WHERE character_id = $1 AND chapter_id = $2");
        sqlx::query_as::<_, Card>(&query)
            .bind(character_id)
            .bind(chapter_id)
            .fetch_optional(executor)
            .await
    }

    /// List all cards. Callers must not rely on the order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards ORDER BY created_at, id");
        sqlx::query_as::<_, Card>(&query).fetch_all(pool).await
    }

    /// Update a card. Only supplied fields are applied; an empty `content`,
    /// `tag` or `color` clears it.
    ///
    /// Supplying `characterId`/`chapterId` moves the card. A move onto an
    /// occupied cell swaps the two cards or fails with a conflict, per
    /// `policy`. The whole update runs in one transaction.
    ///
    /// Returns `None` if no card with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: EntityId,
        input: UpdateCard,
        policy: MovePolicy,
    ) -> Result<Option<Card>, StoreError> {
        let input = input.normalize()?;
        let mut tx = pool.begin().await?;

        let Some(current) = Self::find_by_id(&mut *tx, id).await? else {
            return Ok(None);
        };
        let from = current.cell();
        let to = input.target_cell(from);

        let mut displaced = None;
        if to != from {
            ensure_cell_exists(&mut tx, to).await?;
            let occupant = Self::find_at(&mut *tx, to.character_id, to.chapter_id).await?;
            let plan = moves::plan_move(id, from, to, occupant.as_ref().map(|c| c.id), policy)?;
            if let MovePlan::Swap { other_id, .. } = plan {
                // Lift the occupant out so the unique index never sees two
                // cards at `to`; it is re-inserted at `from` below.
                sqlx::query("DELETE FROM cards WHERE id = $1")
                    .bind(other_id)
                    .execute(&mut *tx)
                    .await?;
                displaced = occupant;
            }
        }

        let now = Utc::now();
        let query = format!(
            "UPDATE cards SET
                character_id = $2,
                chapter_id = $3,
                content = CASE WHEN $4 IS NULL THEN content
                               WHEN $4 = '' THEN NULL
                               ELSE $4 END,
                tag = CASE WHEN $5 IS NULL THEN tag
                           WHEN $5 = '' THEN NULL
                           ELSE $5 END,
                color = CASE WHEN $6 IS NULL THEN color
                             WHEN $6 = '' THEN NULL
                             ELSE $6 END,
                updated_at = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let card = sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .bind(to.character_id)
            .bind(to.chapter_id)
            .bind(&input.content)
            .bind(&input.tag)
            .bind(&input.color)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(other) = displaced {
            sqlx::query(
                "INSERT INTO cards (id, character_id, chapter_id, content, tag, color, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(other.id)
            .bind(from.character_id)
            .bind(from.chapter_id)
            .bind(&other.content)
            .bind(&other.tag)
            .bind(&other.color)
            .bind(other.created_at)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            tracing::debug!(card_id = %id, other_id = %other.id, "Cards swapped");
        }

        tx.commit().await?;
        Ok(Some(card))
    }

    /// Delete a card by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Check both axes of `cell` reference existing rows.
async fn ensure_cell_exists(conn: &mut SqliteConnection, cell: CellKey) -> Result<(), StoreError> {
    let characters = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM characters WHERE id = $1")
        .bind(cell.character_id)
        .fetch_one(&mut *conn)
        .await?;
    if characters == 0 {
        return Err(CoreError::Validation(format!(
            "characterId {} does not reference an existing character",
            cell.character_id
        ))
        .into());
    }

    let chapters = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM chapters WHERE id = $1")
        .bind(cell.chapter_id)
        .fetch_one(&mut *conn)
        .await?;
    if chapters == 0 {
        return Err(CoreError::Validation(format!(
            "chapterId {} does not reference an existing chapter",
            cell.chapter_id
        ))
        .into());
    }
    Ok(())
}
