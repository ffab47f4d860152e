// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, test configuration, and fully wired routers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `rezepte_server`

use anyhow::Result;
use axum::Router;
use rezepte_server::{
    config::ServerConfig,
    constants::env_vars,
    database::{Database, RecipeStore, RecipesManager},
    links::RouteTable,
    models::{NewIngredient, NewPart, NewRecipe},
    server::{build_router, ServerResources},
    services::RecipeService,
};
use std::path::Path;
use std::sync::{Arc, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Deadline used for test writes
pub const TEST_WRITE_DEADLINE: Duration = Duration::from_secs(10);

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration for an in-memory store serving UI files from `assets_dir`
pub fn test_config(assets_dir: &Path) -> ServerConfig {
    let assets = assets_dir.display().to_string();
    ServerConfig::from_lookup(|key| match key {
        k if k == env_vars::DSN => Some("sqlite::memory:".to_owned()),
        k if k == env_vars::ASSETS_DIR => Some(assets.clone()),
        _ => None,
    })
    .expect("test configuration must be valid")
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let config = test_config(Path::new("assets"));
    Ok(Database::new(&config.database).await?)
}

/// Recipe store over a fresh in-memory database
pub async fn create_test_store() -> Result<(Database, RecipesManager)> {
    let database = create_test_database().await?;
    let store = database.recipes(TEST_WRITE_DEADLINE);
    Ok((database, store))
}

/// Shared server resources over a fresh in-memory database
pub async fn create_test_resources(assets_dir: &Path) -> Result<(Database, Arc<ServerResources>)> {
    let database = create_test_database().await?;
    let store: Arc<dyn RecipeStore> = Arc::new(database.recipes(TEST_WRITE_DEADLINE));
    let resources = Arc::new(ServerResources::new(
        RecipeService::new(store, RouteTable::standard()),
        test_config(assets_dir),
    ));
    Ok((database, resources))
}

/// Fully wired router over a fresh in-memory database
pub async fn create_test_router(assets_dir: &Path) -> Result<(Database, Router)> {
    let (database, resources) = create_test_resources(assets_dir).await?;
    Ok((database, build_router(&resources)))
}

/// Fully wired router whose requests time out after `request_timeout`
pub async fn create_test_router_with_request_timeout(
    assets_dir: &Path,
    request_timeout: Duration,
) -> Result<(Database, Router)> {
    let database = create_test_database().await?;
    let store: Arc<dyn RecipeStore> = Arc::new(database.recipes(TEST_WRITE_DEADLINE));
    let mut config = test_config(assets_dir);
    config.timeouts.request = request_timeout;
    let resources = Arc::new(ServerResources::new(
        RecipeService::new(store, RouteTable::standard()),
        config,
    ));
    Ok((database, build_router(&resources)))
}

/// Make every insert of an ingredient named `name` take a few hundred milliseconds
///
/// The trigger counts a 300-row table cross-joined with itself three times.
pub async fn slow_ingredient(database: &Database, name: &str) {
    let statements = [
        "CREATE TABLE filler (x INTEGER)".to_owned(),
        "WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < 300) \
         INSERT INTO filler (x) SELECT n FROM seq"
            .to_owned(),
        format!(
            "CREATE TRIGGER slow_marker BEFORE INSERT ON ingredients \
             WHEN NEW.name = '{name}' \
             BEGIN SELECT COUNT(*) FROM filler a, filler b, filler c; END"
        ),
    ];
    for statement in statements {
        sqlx::query(&statement)
            .execute(database.pool())
            .await
            .expect("slow trigger setup failed");
    }
}

/// Ingredient with a name, quantity, and unit
pub fn ingredient(name: &str, quantity: f64, unit: &str) -> NewIngredient {
    NewIngredient {
        name: name.to_owned(),
        quantity: Some(quantity),
        unit: unit.to_owned(),
        note: String::new(),
    }
}

/// Part with a label and ingredients
pub fn part(label: &str, ingredients: Vec<NewIngredient>) -> NewPart {
    NewPart {
        label: label.to_owned(),
        ingredients,
    }
}

/// Recipe submission with the given label and parts
pub fn recipe(label: &str, parts: Vec<NewPart>) -> NewRecipe {
    NewRecipe {
        label: label.to_owned(),
        instructions: format!("Prepare {label}."),
        tags: Vec::new(),
        parts,
    }
}

/// Row count of one table
pub async fn count_rows(database: &Database, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(database.pool())
        .await
        .expect("count query failed")
}
