// ABOUTME: SQLite recipe store: head/tag/part queries and the atomic multi-table create path
// ABOUTME: Inserts recipe, tags, parts, and ingredients in submission order inside one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

use super::transactions::SqliteTransactionGuard;
use super::RecipeStore;
use crate::assembly::PartRow;
use crate::errors::{AppError, AppResult};
use crate::models::{Ingredient, NewPart, NewRecipe, RecipeHeadRow, RecordId};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

const LIST_HEADS_QUERY: &str = r"
    SELECT r.recipe_id, r.label, '' AS instructions, GROUP_CONCAT(rt.tag) AS tags
    FROM recipes r
    LEFT JOIN recipe_tags rt ON r.recipe_id = rt.recipe_id
    GROUP BY r.recipe_id, r.label
    ORDER BY r.label, r.recipe_id
";

// GROUP BY keeps a missing id at zero rows instead of one all-NULL aggregate row
const FIND_HEAD_QUERY: &str = r"
    SELECT r.recipe_id, r.label, r.instructions, GROUP_CONCAT(rt.tag) AS tags
    FROM recipes r
    LEFT JOIN recipe_tags rt ON r.recipe_id = rt.recipe_id
    WHERE r.recipe_id = $1
    GROUP BY r.recipe_id, r.label, r.instructions
";

const PART_ROWS_QUERY: &str = r"
    SELECT p.part_id, p.label AS part_label,
           i.ingredient_id, i.name, i.quantity, i.unit, i.note
    FROM parts p
    LEFT JOIN ingredients i ON i.part_id = p.part_id
    WHERE p.recipe_id = $1
    ORDER BY p.seq, p.part_id, i.seq, i.ingredient_id
";

/// Row counts written by one successful create
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct InsertStats {
    recipe_id: RecordId,
    parts: usize,
    ingredients: usize,
    skipped: usize,
}

/// Recipe database operations manager
#[derive(Clone)]
pub struct RecipesManager {
    pool: SqlitePool,
    write_deadline: Duration,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool, write_deadline: Duration) -> Self {
        Self {
            pool,
            write_deadline,
        }
    }

    /// Run the insert sequence in one transaction, resolving it exactly once
    ///
    /// Any failure, including running past the write deadline, ends in an
    /// explicit rollback before the error is returned.
    async fn create_in_transaction(&self, recipe: &NewRecipe) -> AppResult<RecordId> {
        let mut guard = SqliteTransactionGuard::new(
            self.pool
                .begin()
                .await
                .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?,
        );

        let outcome = timeout(
            self.write_deadline,
            insert_recipe_tree(guard.executor()?, recipe),
        )
        .await;

        match outcome {
            Ok(Ok(stats)) => {
                guard.commit().await?;
                info!(
                    recipe.id = stats.recipe_id,
                    recipe.parts = stats.parts,
                    recipe.ingredients = stats.ingredients,
                    recipe.skipped_ingredients = stats.skipped,
                    "Recipe created"
                );
                Ok(stats.recipe_id)
            }
            Ok(Err(e)) => Err(abort(guard, e).await),
            Err(_) => {
                let cause = AppError::unavailable(format!(
                    "Recipe creation exceeded its {:?} deadline",
                    self.write_deadline
                ));
                Err(abort(guard, cause).await)
            }
        }
    }
}

/// Roll back and hand back the error that caused it
async fn abort(guard: SqliteTransactionGuard<'_>, cause: AppError) -> AppError {
    if let Err(rollback_error) = guard.rollback().await {
        warn!(error = %rollback_error, "Rollback after failed recipe creation also failed");
    } else {
        debug!(error = %cause, "Recipe creation rolled back");
    }
    cause
}

/// Zero-based sequence number for a list position
fn sequence_number(index: usize) -> AppResult<i64> {
    i64::try_from(index).map_err(|_| AppError::invalid_input("Too many items in submission"))
}

/// Insert recipe head, tags, then each part followed by its ingredients
///
/// Sequence numbers are the submitted list positions, so a skipped
/// placeholder ingredient leaves a gap. Readers only rely on the order.
async fn insert_recipe_tree(
    conn: &mut SqliteConnection,
    recipe: &NewRecipe,
) -> AppResult<InsertStats> {
    let recipe_id = sqlx::query("INSERT INTO recipes (label, instructions) VALUES ($1, $2)")
        .bind(&recipe.label)
        .bind(&recipe.instructions)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert recipe: {e}")))?
        .last_insert_rowid();

    for tag in &recipe.tags {
        sqlx::query("INSERT OR IGNORE INTO recipe_tags (recipe_id, tag) VALUES ($1, $2)")
            .bind(recipe_id)
            .bind(tag)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert tag {tag:?}: {e}")))?;
    }

    let mut stats = InsertStats {
        recipe_id,
        ..InsertStats::default()
    };

    for (index, part) in recipe.parts.iter().enumerate() {
        let part_seq = sequence_number(index)?;
        let part_id = sqlx::query("INSERT INTO parts (recipe_id, label, seq) VALUES ($1, $2, $3)")
            .bind(recipe_id)
            .bind(&part.label)
            .bind(part_seq)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert part {part_seq}: {e}")))?
            .last_insert_rowid();
        stats.parts += 1;

        let (inserted, skipped) = insert_ingredients(conn, recipe_id, part_id, part_seq, part).await?;
        stats.ingredients += inserted;
        stats.skipped += skipped;
    }

    Ok(stats)
}

/// Insert one part's non-placeholder ingredients, returning (inserted, skipped)
async fn insert_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: RecordId,
    part_id: RecordId,
    part_seq: i64,
    part: &NewPart,
) -> AppResult<(usize, usize)> {
    let mut inserted = 0;
    let mut skipped = 0;

    for (index, ingredient) in part.ingredients.iter().enumerate() {
        if ingredient.is_placeholder() {
            skipped += 1;
            continue;
        }

        let seq = sequence_number(index)?;
        sqlx::query(
            r"
            INSERT INTO ingredients (recipe_id, part_id, name, seq, quantity, unit, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(recipe_id)
        .bind(part_id)
        .bind(&ingredient.name)
        .bind(seq)
        .bind(ingredient.quantity_or_zero())
        .bind(&ingredient.unit)
        .bind(&ingredient.note)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::database(format!(
                "Failed to insert ingredient {seq} of part {part_seq}: {e}"
            ))
        })?;
        inserted += 1;
    }

    Ok((inserted, skipped))
}

fn row_to_head(row: &SqliteRow) -> AppResult<RecipeHeadRow> {
    Ok(RecipeHeadRow {
        id: row.try_get("recipe_id")?,
        label: row.try_get("label")?,
        instructions: row.try_get("instructions")?,
        tags: row.try_get("tags")?,
    })
}

fn row_to_part_row(row: &SqliteRow) -> AppResult<PartRow> {
    let ingredient_id: Option<RecordId> = row.try_get("ingredient_id")?;
    let ingredient = match ingredient_id {
        Some(id) => Some(Ingredient {
            id,
            name: row.try_get("name")?,
            quantity: row.try_get("quantity")?,
            unit: row.try_get("unit")?,
            note: row.try_get("note")?,
        }),
        None => None,
    };

    Ok(PartRow {
        part_id: row.try_get("part_id")?,
        part_label: row.try_get("part_label")?,
        ingredient,
    })
}

#[async_trait]
impl RecipeStore for RecipesManager {
    async fn list_heads(&self) -> AppResult<Vec<RecipeHeadRow>> {
        let rows = sqlx::query(LIST_HEADS_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        rows.iter().map(row_to_head).collect()
    }

    async fn find_head(&self, id: RecordId) -> AppResult<Option<RecipeHeadRow>> {
        let row = sqlx::query(FIND_HEAD_QUERY)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe {id}: {e}")))?;

        row.as_ref().map(row_to_head).transpose()
    }

    async fn part_rows(&self, id: RecordId) -> AppResult<Vec<PartRow>> {
        let rows = sqlx::query(PART_ROWS_QUERY)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get parts of recipe {id}: {e}")))?;

        rows.iter().map(row_to_part_row).collect()
    }

    async fn create(&self, recipe: &NewRecipe) -> AppResult<RecordId> {
        self.create_in_transaction(recipe).await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }
}
