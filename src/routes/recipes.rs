// ABOUTME: Route handlers for the recipe REST API (list, detail, create)
// ABOUTME: Thin handlers that parse the request and delegate to RecipeService
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

//! Recipe routes
//!
//! Mounted under `/api`. Every failure, including malformed bodies and
//! unknown API paths, answers with the structured error body.

use super::method_not_allowed;
use crate::{
    constants::routes,
    errors::AppError,
    models::{NewRecipe, RecordId},
    server::ServerResources,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create the recipe API router, to be nested under the API prefix
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                routes::RECIPES,
                get(Self::handle_list)
                    .post(Self::handle_create)
                    .fallback(method_not_allowed),
            )
            .route(
                routes::RECIPE,
                get(Self::handle_get).fallback(method_not_allowed),
            )
            .fallback(Self::handle_unknown)
            .with_state(resources)
    }

    /// Handle GET /api/recipes - List recipe heads ordered by label
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let heads = resources.recipes.list_recipes().await?;
        Ok((StatusCode::OK, Json(heads)).into_response())
    }

    /// Handle GET /api/recipes/:id - Get one recipe with its parts
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = parse_id(&id)?;
        let recipe = resources.recipes.get_recipe(id).await?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle POST /api/recipes - Create a recipe, answering with its UI link
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<NewRecipe>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(recipe) =
            body.map_err(|e| AppError::invalid_input(format!("Invalid recipe body: {e}")))?;

        let link = resources.recipes.create_recipe(recipe).await?;
        Ok((
            StatusCode::CREATED,
            [(header::LOCATION, link.clone())],
            Json(link),
        )
            .into_response())
    }

    async fn handle_unknown(uri: Uri) -> AppError {
        AppError::not_found(format!("API route {}", uri.path()))
    }
}

fn parse_id(raw: &str) -> Result<RecordId, AppError> {
    raw.parse()
        .map_err(|_| AppError::invalid_input(format!("Invalid recipe id: {raw:?}")))
}
