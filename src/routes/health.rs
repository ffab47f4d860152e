// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness answers unconditionally; readiness pings the recipe store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

//! Health check routes for load balancers and orchestrators

use super::method_not_allowed;
use crate::{errors::AppError, server::ServerResources};
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler(
            State(resources): State<Arc<ServerResources>>,
        ) -> Result<Json<serde_json::Value>, AppError> {
            resources
                .recipes
                .store()
                .ping()
                .await
                .map_err(|e| AppError::unavailable(format!("Storage not ready: {}", e.message)))?;

            Ok(Json(serde_json::json!({
                "status": "ready",
                "timestamp": chrono::Utc::now().to_rfc3339()
            })))
        }

        Router::new()
            .route("/health", get(health_handler).fallback(method_not_allowed))
            .route("/ready", get(ready_handler).fallback(method_not_allowed))
            .with_state(resources)
    }
}
