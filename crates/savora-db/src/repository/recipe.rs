//! # Recipe Repository
//!
//! Database operations for the recipe aggregate: a parent row plus its two
//! owned child collections (ingredients, steps).
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Aggregate Write (create/update/delete)                 │
//! │                                                                         │
//! │  validate input          ← rejected BEFORE any statement runs          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │       │                                                                 │
//! │       ├── parent statement (INSERT / UPDATE / DELETE + affected-rows)  │
//! │       ├── child statements (ingredients, steps)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT on success                                                     │
//! │  ROLLBACK on any error (transaction guard drops un-committed)          │
//! │                                                                         │
//! │  A parent row can never survive with a partial or missing child set.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read Path
//! `get` and `list` run on pooled connections without a transaction: fetch
//! the parent row(s), then re-assemble each aggregate from two child reads
//! (steps ordered by step_number). `list` is a deliberate N+1 fan-out - two
//! extra reads per recipe - which is acceptable at this scale and the main
//! throughput risk if the table grows.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use savora_core::{Ingredient, NewRecipe, Recipe, RecipeWithDetails, Step};

/// Columns of one `recipes` row, in the shape [`Recipe`] maps from.
const RECIPE_COLUMNS: &str = "id, name, description, servings, preparation_time, \
     cooking_time, difficulty, country, image, created_at, updated_at";

/// Repository for recipe database operations.
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    pool: SqlitePool,
}

impl RecipeRepository {
    /// Creates a new RecipeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RecipeRepository { pool }
    }

    /// Creates a recipe together with its full child set.
    ///
    /// ## What This Does
    /// 1. Validates the input (invalid input never reaches storage)
    /// 2. Inserts the parent row with both timestamps set to now
    /// 3. Reads back the generated id
    /// 4. Inserts every ingredient and every step
    ///    (step_number = 1-based position in the supplied order)
    ///
    /// All statements run in one transaction: if any child insert fails the
    /// parent insert is rolled back with it.
    ///
    /// ## Returns
    /// The generated recipe id.
    pub async fn create(&self, input: &NewRecipe) -> DbResult<i64> {
        input.validate()?;

        debug!(name = %input.name, "Creating recipe");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO recipes (
                name, description, servings, preparation_time,
                cooking_time, difficulty, country, image,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.servings)
        .bind(input.preparation_time)
        .bind(input.cooking_time)
        .bind(&input.difficulty)
        .bind(&input.country)
        .bind(&input.image)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        insert_children(&mut tx, id, input).await?;

        tx.commit().await?;

        debug!(id, "Recipe created");
        Ok(id)
    }

    /// Gets a recipe by id, with both child collections attached.
    ///
    /// ## Returns
    /// * `Ok(RecipeWithDetails)` - the assembled aggregate
    /// * `Err(DbError::NotFound)` - no such recipe
    pub async fn get(&self, id: i64) -> DbResult<RecipeWithDetails> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Recipe", id))?;

        self.assemble(recipe).await
    }

    /// Lists all recipes, each with its child collections attached.
    ///
    /// Parent rows come back in storage order (no explicit sort). Each
    /// recipe costs two further reads - see the module docs on the N+1
    /// fan-out.
    pub async fn list(&self) -> DbResult<Vec<RecipeWithDetails>> {
        let recipes =
            sqlx::query_as::<_, Recipe>(&format!("SELECT {RECIPE_COLUMNS} FROM recipes"))
                .fetch_all(&self.pool)
                .await?;

        debug!(count = recipes.len(), "Listing recipes");

        let mut details = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            details.push(self.assemble(recipe).await?);
        }

        Ok(details)
    }

    /// Updates a recipe by full replacement.
    ///
    /// ## What This Does
    /// 1. Validates the input
    /// 2. Updates every scalar field on the parent row, refreshing
    ///    `updated_at`; a supplied image reference replaces the stored one,
    ///    an absent one preserves it
    /// 3. Deletes all existing ingredients and steps for the id
    /// 4. Re-inserts the submitted child sets, steps renumbered 1..N
    ///
    /// There is no partial/diff update of children; submitting the same
    /// payload twice leaves the child collections identical.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - the parent UPDATE affected zero rows
    ///   (checked explicitly; statement success alone proves nothing)
    pub async fn update(&self, id: i64, input: &NewRecipe) -> DbResult<()> {
        input.validate()?;

        debug!(id, "Updating recipe");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE recipes SET
                name = ?2,
                description = ?3,
                servings = ?4,
                preparation_time = ?5,
                cooking_time = ?6,
                difficulty = ?7,
                country = ?8,
                image = COALESCE(?9, image),
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.servings)
        .bind(input.preparation_time)
        .bind(input.cooking_time)
        .bind(&input.difficulty)
        .bind(&input.country)
        .bind(&input.image)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back; nothing was changed
            return Err(DbError::not_found("Recipe", id));
        }

        sqlx::query("DELETE FROM ingredients WHERE recipe_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM steps WHERE recipe_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_children(&mut tx, id, input).await?;

        tx.commit().await?;

        debug!(id, "Recipe updated");
        Ok(())
    }

    /// Deletes a recipe and everything it owns.
    ///
    /// Children go first (steps, then ingredients), the parent last, all in
    /// one transaction - the foreign keys would reject the reverse order.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - the parent DELETE affected zero rows
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting recipe");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM steps WHERE recipe_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM ingredients WHERE recipe_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM recipes WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Recipe", id));
        }

        tx.commit().await?;

        debug!(id, "Recipe deleted");
        Ok(())
    }

    /// Attaches both child collections to a parent row.
    async fn assemble(&self, recipe: Recipe) -> DbResult<RecipeWithDetails> {
        let ingredients = sqlx::query_as::<_, Ingredient>(
            "SELECT name, quantity, unit FROM ingredients WHERE recipe_id = ?1",
        )
        .bind(recipe.id)
        .fetch_all(&self.pool)
        .await?;

        let steps = sqlx::query_as::<_, Step>(
            "SELECT step_number, instruction FROM steps WHERE recipe_id = ?1 \
             ORDER BY step_number",
        )
        .bind(recipe.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(RecipeWithDetails {
            recipe,
            ingredients,
            steps,
        })
    }
}

/// Inserts the full child set for a recipe inside an open transaction.
///
/// Steps are numbered from their position in the supplied sequence; sibling
/// order between ingredient and step inserts is irrelevant, only the
/// enclosing all-or-nothing unit matters.
async fn insert_children(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: i64,
    input: &NewRecipe,
) -> DbResult<()> {
    for ingredient in &input.ingredients {
        sqlx::query(
            "INSERT INTO ingredients (recipe_id, name, quantity, unit) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(recipe_id)
        .bind(&ingredient.name)
        .bind(&ingredient.quantity)
        .bind(&ingredient.unit)
        .execute(&mut **tx)
        .await?;
    }

    for (index, instruction) in input.steps.iter().enumerate() {
        sqlx::query(
            "INSERT INTO steps (recipe_id, step_number, instruction) \
             VALUES (?1, ?2, ?3)",
        )
        .bind(recipe_id)
        .bind(index as i64 + 1)
        .bind(instruction)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
