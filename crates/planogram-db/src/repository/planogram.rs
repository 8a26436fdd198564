//! # Planogram Repository
//!
//! Database operations for the `planogramas` table.
//!
//! ## Row Shape
//! ```text
//! ┌────┬──────────┬─────────────┬────────┬────────┬────────┐
//! │ id │ name     │ image       │ store  │ aisle  │ shelf  │
//! ├────┼──────────┼─────────────┼────────┼────────┼────────┤
//! │  1 │ Shelf A  │ <PNG bytes> │ Store1 │ Aisle3 │ Shelf2 │
//! └────┴──────────┴─────────────┴────────┴────────┴────────┘
//! ```
//!
//! The image blob is only read by [`PlanogramRepository::get`] and
//! [`PlanogramRepository::image`]; listings never load it.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use planogram_core::{NewPlanogram, PlanogramId, PlanogramRecord, PlanogramSummary, PlanogramUpdate};

const ENTITY: &str = "Planogram";

/// Repository for planogram database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = PlanogramRepository::new(pool);
///
/// let id = repo.create(&new_planogram).await?;
/// let record = repo.get(id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PlanogramRepository {
    pool: SqlitePool,
}

impl PlanogramRepository {
    /// Creates a new PlanogramRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PlanogramRepository { pool }
    }

    /// Inserts a new planogram and returns its generated id.
    ///
    /// ## Returns
    /// * `Ok(id)` - Row committed
    /// * `Err(DbError::Validation)` - A field was empty; nothing was written
    pub async fn create(&self, new: &NewPlanogram) -> DbResult<PlanogramId> {
        new.validate()?;

        debug!(name = %new.name, image_len = new.image.len(), "Inserting planogram");

        let result = sqlx::query(
            r#"
            INSERT INTO planogramas (name, image, store, aisle, shelf)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&new.name)
        .bind(&new.image)
        .bind(&new.store)
        .bind(&new.aisle)
        .bind(&new.shelf)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id = id, "Planogram inserted");
        Ok(id)
    }

    /// Gets a planogram, image included.
    ///
    /// ## Returns
    /// * `Ok(Some(record))` - Found
    /// * `Ok(None)` - No row with that id
    pub async fn get(&self, id: PlanogramId) -> DbResult<Option<PlanogramRecord>> {
        debug!(id = id, "Fetching planogram");

        let record = sqlx::query_as::<_, PlanogramRecord>(
            r#"
            SELECT
                id,
                COALESCE(name, '')     AS name,
                COALESCE(image, X'')   AS image,
                COALESCE(store, '')    AS store,
                COALESCE(aisle, '')    AS aisle,
                COALESCE(shelf, '')    AS shelf
            FROM planogramas
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists every planogram without its image, oldest id first.
    pub async fn list(&self) -> DbResult<Vec<PlanogramSummary>> {
        let rows = sqlx::query_as::<_, PlanogramSummary>(
            r#"
            SELECT
                id,
                COALESCE(name, '')  AS name,
                COALESCE(store, '') AS store,
                COALESCE(aisle, '') AS aisle,
                COALESCE(shelf, '') AS shelf
            FROM planogramas
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed planograms");
        Ok(rows)
    }

    /// Returns only the stored image bytes.
    pub async fn image(&self, id: PlanogramId) -> DbResult<Option<Vec<u8>>> {
        let blob: Option<Option<Vec<u8>>> =
            sqlx::query_scalar("SELECT image FROM planogramas WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(blob.map(Option::unwrap_or_default))
    }

    /// True if a row with this id exists.
    pub async fn exists(&self, id: PlanogramId) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM planogramas WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Number of stored planograms.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM planogramas")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Overwrites the text fields of an existing planogram.
    ///
    /// The image column is only touched when `changes.image` is `Some`.
    ///
    /// ## Returns
    /// * `Ok(())` - Update committed
    /// * `Err(DbError::NotFound)` - No row with that id
    pub async fn update(&self, id: PlanogramId, changes: &PlanogramUpdate) -> DbResult<()> {
        changes.validate()?;

        debug!(
            id = id,
            replaces_image = changes.replaces_image(),
            "Updating planogram"
        );

        let result = match &changes.image {
            Some(image) => {
                sqlx::query(
                    r#"
                    UPDATE planogramas SET
                        name = ?2,
                        image = ?3,
                        store = ?4,
                        aisle = ?5,
                        shelf = ?6
                    WHERE id = ?1
                    "#,
                )
                .bind(id)
                .bind(&changes.name)
                .bind(image)
                .bind(&changes.store)
                .bind(&changes.aisle)
                .bind(&changes.shelf)
                .execute(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    UPDATE planogramas SET
                        name = ?2,
                        store = ?3,
                        aisle = ?4,
                        shelf = ?5
                    WHERE id = ?1
                    "#,
                )
                .bind(id)
                .bind(&changes.name)
                .bind(&changes.store)
                .bind(&changes.aisle)
                .bind(&changes.shelf)
                .execute(&self.pool)
                .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id));
        }

        Ok(())
    }

    /// Permanently removes a planogram.
    ///
    /// ## Returns
    /// * `Ok(())` - Row deleted
    /// * `Err(DbError::NotFound)` - No row with that id
    pub async fn delete(&self, id: PlanogramId) -> DbResult<()> {
        debug!(id = id, "Deleting planogram");

        let result = sqlx::query("DELETE FROM planogramas WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
