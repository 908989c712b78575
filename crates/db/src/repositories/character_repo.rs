//! Repository for the `characters` table.

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use storygrid_core::rank;
use storygrid_core::types::{new_id, EntityId};

use crate::error::StoreError;
use crate::models::character::{Character, CreateCharacter, UpdateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, role, sort_order, color, created_at, updated_at";

/// Provides CRUD operations for characters. Deletes cascade to cards.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the created row.
    ///
    /// If `order` is omitted it is assigned `count + 1`.
    pub async fn create(
        pool: &SqlitePool,
        input: CreateCharacter,
    ) -> Result<Character, StoreError> {
        let input = input.normalize()?;
        let mut tx = pool.begin().await?;

        let sort_order = match input.sort_order {
            Some(order) => order,
            None => rank::next_rank(Self::count(&mut *tx).await? as usize),
        };

        let query = format!(
            "INSERT INTO characters (id, name, role, sort_order, color, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {COLUMNS}"
        );
        let character = sqlx::query_as::<_, Character>(&query)
            .bind(new_id())
            .bind(&input.name)
            .bind(&input.role)
            .bind(&sort_order)
            .bind(&input.color)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(character)
    }

    /// Find a character by id.
    pub async fn find_by_id<'e, E>(
        executor: E,
        id: EntityId,
    ) -> Result<Option<Character>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all characters in rank order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters");
        let mut characters = sqlx::query_as::<_, Character>(&query)
            .fetch_all(pool)
            .await?;
        rank::sort_by_rank(&mut characters);
        Ok(characters)
    }

    /// Number of characters.
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM characters")
            .fetch_one(executor)
            .await
    }

    /// Update a character. Only supplied fields are applied; an empty
    /// `role` or `color` clears it.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: EntityId,
        input: UpdateCharacter,
    ) -> Result<Option<Character>, StoreError> {
        let input = input.normalize()?;
        let query = format!(
            "UPDATE characters SET
                name = COALESCE($2, name),
                role = CASE WHEN $3 IS NULL THEN role
                            WHEN $3 = '' THEN NULL
                            ELSE $3 END,
                sort_order = COALESCE($4, sort_order),
                color = CASE WHEN $5 IS NULL THEN color
                             WHEN $5 = '' THEN NULL
                             ELSE $5 END,
                updated_at = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let character = sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.sort_order)
            .bind(&input.color)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await?;
        Ok(character)
    }

    /// Delete a character and every card in its row, atomically.
    ///
    /// Returns the number of cards removed, or `None` if the character does
    /// not exist (in which case nothing is touched).
    pub async fn delete(pool: &SqlitePool, id: EntityId) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM characters WHERE id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if exists == 0 {
            return Ok(None);
        }

        let cards = sqlx::query("DELETE FROM cards WHERE character_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(cards.rows_affected()))
    }
}
