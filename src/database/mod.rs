// ABOUTME: Storage layer: process-wide SQLite pool, schema bootstrap, and the recipe store seam
// ABOUTME: Services depend on the RecipeStore trait so tests can substitute the storage collaborator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

//! # Database Management
//!
//! [`Database`] owns the connection pool. It is created once at startup,
//! never replaced, and shared by cloning the handle into request state.
//! Request handlers only see it through [`RecipeStore`].

/// `SQLite` recipe store with the transactional write path
pub mod recipes;
/// RAII transaction guard
pub mod transactions;

pub use recipes::RecipesManager;
pub use transactions::{SqliteTransactionGuard, TransactionGuard};

use crate::assembly::PartRow;
use crate::config::DatabaseConfig;
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::models::{NewRecipe, RecipeHeadRow, RecordId};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Storage operations the recipe services need
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipe heads with aggregated tags, ordered by label
    async fn list_heads(&self) -> AppResult<Vec<RecipeHeadRow>>;

    /// Head row (with instructions) for one recipe, `None` if it does not exist
    async fn find_head(&self, id: RecordId) -> AppResult<Option<RecipeHeadRow>>;

    /// Flat part/ingredient rows for one recipe, ordered by part then ingredient sequence
    async fn part_rows(&self, id: RecordId) -> AppResult<Vec<PartRow>>;

    /// Persist a submission atomically and return the new recipe identifier
    async fn create(&self, recipe: &NewRecipe) -> AppResult<RecordId>;

    /// Verify the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Database handle wrapping the shared connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool described by `config`, creating the schema if enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is unusable, the store is
    /// unreachable, or schema creation fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url.to_connection_string())
            .map_err(|e| AppError::config_invalid(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.pool_size())
            .acquire_timeout(Duration::from_secs(defaults::DATABASE_CONNECT_TIMEOUT_SECS));
        if config.url.is_memory() {
            // The in-memory database lives exactly as long as its one connection
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let db = Self { pool };
        if config.auto_create_schema {
            db.create_schema().await?;
        }

        info!(
            database = %config.url,
            pool_size = config.pool_size(),
            "Database initialized"
        );
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Recipe store backed by this pool
    #[must_use]
    pub fn recipes(&self, write_deadline: Duration) -> RecipesManager {
        RecipesManager::new(self.pool.clone(), write_deadline)
    }

    /// Create the recipe tables and indexes when they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails
    pub async fn create_schema(&self) -> AppResult<()> {
        const STATEMENTS: [&str; 6] = [
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                recipe_id INTEGER PRIMARY KEY AUTOINCREMENT,
                label TEXT NOT NULL CHECK (label <> ''),
                instructions TEXT NOT NULL DEFAULT ''
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS recipe_tags (
                recipe_id INTEGER NOT NULL REFERENCES recipes(recipe_id) ON DELETE CASCADE,
                tag TEXT NOT NULL,
                PRIMARY KEY (recipe_id, tag)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS parts (
                part_id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(recipe_id) ON DELETE CASCADE,
                label TEXT NOT NULL DEFAULT '',
                seq INTEGER NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                ingredient_id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(recipe_id) ON DELETE CASCADE,
                part_id INTEGER NOT NULL REFERENCES parts(part_id) ON DELETE CASCADE,
                name TEXT NOT NULL CHECK (name <> ''),
                seq INTEGER NOT NULL,
                quantity REAL NOT NULL DEFAULT 0,
                unit TEXT NOT NULL DEFAULT '',
                note TEXT NOT NULL DEFAULT ''
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_parts_recipe_seq ON parts(recipe_id, seq)",
            "CREATE INDEX IF NOT EXISTS idx_ingredients_part_seq ON ingredients(part_id, seq)",
        ];

        for statement in STATEMENTS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to create schema: {e}")))?;
        }
        Ok(())
    }
}
