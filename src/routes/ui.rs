// ABOUTME: Static UI shell serving: assets directory plus index.html for every other page path
// ABOUTME: Client-side routing owns /recipes/{id}, so unknown non-API paths get the shell
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

use crate::constants::routes;
use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// UI shell routes implementation
pub struct UiRoutes;

impl UiRoutes {
    /// Serve `/assets/*` from `assets_dir` and `index_file` for everything unmatched
    pub fn routes(assets_dir: &Path, index_file: &Path) -> Router {
        Router::new()
            .nest_service(routes::ASSETS, ServeDir::new(assets_dir))
            .fallback_service(ServeFile::new(index_file))
    }
}
