// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads the connection string, listen address, asset directory, and deadlines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

//! Environment-based configuration management
//!
//! All settings come from process environment variables. The only required
//! value is the storage connection string; everything else has a default.
//! Any problem here is a startup failure: the server must not bind a
//! listener with a configuration it cannot honor.

use super::database::{DatabaseConfig, DatabaseUrl};
use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Environment type for logging and deployment behavior
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Deadlines applied to request handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Upper bound for one read or list request
    pub request: Duration,
    /// Upper bound for one create transaction
    pub write: Duration,
    /// Drain window after a shutdown signal
    pub shutdown: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            write: Duration::from_secs(defaults::WRITE_DEADLINE_SECS),
            shutdown: Duration::from_secs(defaults::SHUTDOWN_TIMEOUT_SECS),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub host: IpAddr,
    /// Listen port
    pub http_port: u16,
    /// Storage settings
    pub database: DatabaseConfig,
    /// Directory containing `index.html` and the static assets
    pub assets_dir: PathBuf,
    /// Request and transaction deadlines
    pub timeouts: TimeoutConfig,
    /// Deployment environment
    pub environment: Environment,
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when `REZEPTE_DSN` is unset or empty and
    /// `ConfigInvalid` when any value cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::from_env`]
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dsn = lookup(env_vars::DSN)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::config_missing(env_vars::DSN))?;

        let database = DatabaseConfig {
            url: DatabaseUrl::parse_url(&dsn)?,
            max_connections: parse_or(
                &lookup,
                env_vars::DATABASE_MAX_CONNECTIONS,
                defaults::DATABASE_MAX_CONNECTIONS,
            )?,
            auto_create_schema: parse_or(&lookup, env_vars::AUTO_CREATE_SCHEMA, true)?,
        };

        let timeouts = TimeoutConfig {
            request: Duration::from_secs(parse_or(
                &lookup,
                env_vars::REQUEST_TIMEOUT_SECS,
                defaults::REQUEST_TIMEOUT_SECS,
            )?),
            write: Duration::from_secs(parse_or(
                &lookup,
                env_vars::WRITE_DEADLINE_SECS,
                defaults::WRITE_DEADLINE_SECS,
            )?),
            shutdown: Duration::from_secs(parse_or(
                &lookup,
                env_vars::SHUTDOWN_TIMEOUT_SECS,
                defaults::SHUTDOWN_TIMEOUT_SECS,
            )?),
        };

        let host_default = IpAddr::from_str(defaults::HOST)
            .map_err(|e| AppError::config_invalid(format!("default host: {e}")))?;

        Ok(Self {
            host: parse_or(&lookup, env_vars::HOST, host_default)?,
            http_port: parse_or(&lookup, env_vars::HTTP_PORT, defaults::HTTP_PORT)?,
            database,
            assets_dir: lookup(env_vars::ASSETS_DIR)
                .map_or_else(|| PathBuf::from(defaults::ASSETS_DIR), PathBuf::from),
            timeouts,
            environment: Environment::from_str_or_default(
                &lookup(env_vars::ENVIRONMENT).unwrap_or_default(),
            ),
        })
    }

    /// Socket address the listener binds to
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.http_port)
    }

    /// Path of the single-page UI entry document
    #[must_use]
    pub fn index_file(&self) -> PathBuf {
        self.assets_dir.join(defaults::INDEX_FILE)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Rezepte Server Configuration:\n\
             - Listen: {}\n\
             - Database: {}\n\
             - Pool Size: {}\n\
             - Assets: {}\n\
             - Request Timeout: {}s\n\
             - Write Deadline: {}s\n\
             - Environment: {}",
            self.socket_addr(),
            if self.database.url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            self.database.pool_size(),
            self.assets_dir.display(),
            self.timeouts.request.as_secs(),
            self.timeouts.write.as_secs(),
            self.environment,
        )
    }
}

/// Parse a variable when set, otherwise use the default
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value {raw:?}: {e}"))),
        None => Ok(default),
    }
}
