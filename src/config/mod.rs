// ABOUTME: Configuration module root re-exporting environment and database settings
// ABOUTME: Groups everything read from the process environment at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

/// Storage connection configuration
pub mod database;
/// Environment-driven server configuration
pub mod environment;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{Environment, ServerConfig, TimeoutConfig};
