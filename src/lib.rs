// ABOUTME: Main library entry point for the Rezepte recipe catalog service
// ABOUTME: Provides the recipe REST API, its SQLite storage layer, and the UI shell server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

#![deny(unsafe_code)]

//! # Rezepte Server
//!
//! A small REST service for a recipe catalog. Recipes are stored as a
//! three-level tree (recipe, parts, ingredients) across relational tables
//! and served as JSON, next to a single-page UI shell.
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers for `/api/recipes`, health, and the UI shell
//! - **Services**: validation, link building, and tree assembly
//! - **Database**: the `RecipeStore` seam and its `SQLite` implementation,
//!   with an all-or-nothing create transaction
//! - **Config**: environment-only configuration, validated before serving
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use rezepte_server::config::ServerConfig;
//! use rezepte_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Rezepte server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Flat join rows to part/ingredient tree
pub mod assembly;

/// Environment-based configuration
pub mod config;

/// Application constants: environment variable names, defaults, route paths
pub mod constants;

/// Connection pool, schema, and recipe store
pub mod database;

/// Unified error handling with HTTP status mapping
pub mod errors;

/// Canonical link builder
pub mod links;

/// Structured logging setup
pub mod logging;

/// Recipe data models
pub mod models;

/// HTTP route handlers
pub mod routes;

/// Router composition and serve loop
pub mod server;

/// Domain services
pub mod services;

/// Tag aggregate parsing
pub mod tags;
