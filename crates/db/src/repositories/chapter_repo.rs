//! Repository for the `chapters` table.

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use storygrid_core::rank;
use storygrid_core::types::{new_id, EntityId};

use crate::error::StoreError;
use crate::models::chapter::{Chapter, CreateChapter, UpdateChapter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, sort_order, created_at, updated_at";

/// Provides CRUD operations for chapters. Deletes cascade to cards.
pub struct ChapterRepo;

impl ChapterRepo {
    /// Insert a new chapter, returning the created row.
    ///
    /// If `order` is omitted it is assigned `count + 1`, counted inside the
    /// same transaction as the insert.
    pub async fn create(pool: &SqlitePool, input: CreateChapter) -> Result<Chapter, StoreError> {
        let input = input.normalize()?;
        let mut tx = pool.begin().await?;

        let sort_order = match input.sort_order {
            Some(order) => order,
            None => rank::next_rank(Self::count(&mut *tx).await? as usize),
        };

        let now = Utc::now();
        let query = format!(
            "INSERT INTO chapters (id, title, description, sort_order, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {COLUMNS}"
        );
        let chapter = sqlx::query_as::<_, Chapter>(&query)
            .bind(new_id())
            .bind(&input.title)
            .bind(&input.description)
            .bind(&sort_order)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(chapter)
    }

    /// Find a chapter by id.
    pub async fn find_by_id<'e, E>(executor: E, id: EntityId) -> Result<Option<Chapter>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM chapters WHERE id = $1");
        sqlx::query_as::<_, Chapter>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all chapters in rank order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Chapter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chapters");
        let mut chapters = sqlx::query_as::<_, Chapter>(&query)
            .fetch_all(pool)
            .await?;
        rank::sort_by_rank(&mut chapters);
        Ok(chapters)
    }

    /// Number of chapters.
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM chapters")
            .fetch_one(executor)
            .await
    }

    /// Update a chapter. Only supplied fields are applied; an empty
    /// `description` clears it.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: EntityId,
        input: UpdateChapter,
    ) -> Result<Option<Chapter>, StoreError> {
        let input = input.normalize()?;
        let query = format!(
            "UPDATE chapters SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 IS NULL THEN description
                                   WHEN $3 = '' THEN NULL
                                   ELSE $3 END,
                sort_order = COALESCE($4, sort_order),
                updated_at = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let chapter = sqlx::query_as::<_, Chapter>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.sort_order)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await?;
        Ok(chapter)
    }

    /// Delete a chapter and every card in its column, atomically.
    ///
    /// Returns the number of cards removed, or `None` if the chapter does
    /// not exist (in which case nothing is touched).
    pub async fn delete(pool: &SqlitePool, id: EntityId) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM chapters WHERE id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if exists == 0 {
            return Ok(None);
        }

        let cards = sqlx::query("DELETE FROM cards WHERE chapter_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM chapters WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(cards.rows_affected()))
    }
}
