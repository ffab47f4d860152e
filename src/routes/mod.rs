// ABOUTME: Route module organization for the Rezepte HTTP endpoints
// ABOUTME: Each domain module holds route definitions and thin handlers delegating to services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

//! Route module for the Rezepte server

/// Health check and readiness routes
pub mod health;
/// Recipe REST API routes
pub mod recipes;
/// Static UI shell routes
pub mod ui;

use crate::errors::AppError;
use axum::extract::OriginalUri;
use axum::http::Method;

/// Method fallback for routes that exist but reject the request method
pub(crate) async fn method_not_allowed(
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> AppError {
    AppError::method_not_allowed(method.as_str(), uri.path())
}

/// Health check route handlers
pub use health::HealthRoutes;
/// Recipe API route handlers
pub use recipes::RecipeRoutes;
/// UI shell route handlers
pub use ui::UiRoutes;
