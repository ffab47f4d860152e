// ABOUTME: Application constants for environment variable names, defaults, and route paths
// ABOUTME: Single place for values shared between configuration, routing, and link generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

/// Service identity used in logs
pub mod service_names {
    /// Name reported in startup logs
    pub const REZEPTE_SERVER: &str = "rezepte-server";
}

/// Environment variable names read by [`crate::config::environment::ServerConfig`]
pub mod env_vars {
    /// Storage connection string (required)
    pub const DSN: &str = "REZEPTE_DSN";
    /// Listen address
    pub const HOST: &str = "HOST";
    /// Deployment environment: development, production, or testing
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Directory holding the UI shell
    pub const ASSETS_DIR: &str = "ASSETS_DIR";
    /// Read/list request deadline in seconds
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
    /// Create-transaction deadline in seconds
    pub const WRITE_DEADLINE_SECS: &str = "WRITE_DEADLINE_SECS";
    /// Graceful shutdown drain window in seconds
    pub const SHUTDOWN_TIMEOUT_SECS: &str = "SHUTDOWN_TIMEOUT_SECS";
    /// Connection pool size
    pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
    /// Whether to create tables at startup
    pub const AUTO_CREATE_SCHEMA: &str = "AUTO_CREATE_SCHEMA";
}

/// Defaults applied when an environment variable is unset
pub mod defaults {
    /// Listen on all interfaces
    pub const HOST: &str = "0.0.0.0";
    /// Listen port
    pub const HTTP_PORT: u16 = 8080;
    /// UI shell directory
    pub const ASSETS_DIR: &str = "./assets";
    /// Name of the SPA entry document inside the assets directory
    pub const INDEX_FILE: &str = "index.html";
    /// Read/list request deadline
    pub const REQUEST_TIMEOUT_SECS: u64 = 15;
    /// Create-transaction deadline
    pub const WRITE_DEADLINE_SECS: u64 = 15;
    /// Graceful shutdown drain window
    pub const SHUTDOWN_TIMEOUT_SECS: u64 = 15;
    /// Connection pool size for file-backed stores
    pub const DATABASE_MAX_CONNECTIONS: u32 = 5;
    /// Startup connection attempt bound
    pub const DATABASE_CONNECT_TIMEOUT_SECS: u64 = 5;
}

/// URL paths served by the router
pub mod routes {
    /// Prefix of every API route
    pub const API_PREFIX: &str = "/api";
    /// Recipe collection (relative to [`API_PREFIX`])
    pub const RECIPES: &str = "/recipes";
    /// Single recipe (relative to [`API_PREFIX`], axum capture syntax)
    pub const RECIPE: &str = "/recipes/:id";
    /// Static asset prefix
    pub const ASSETS: &str = "/assets";
    /// Placeholder substituted by the link builder
    pub const ID_PLACEHOLDER: &str = "{id}";
    /// Canonical API link template for one recipe
    pub const RECIPE_API_TEMPLATE: &str = "/api/recipes/{id}";
    /// Canonical UI link template for one recipe
    pub const RECIPE_UI_TEMPLATE: &str = "/recipes/{id}";
}
