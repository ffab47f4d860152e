// ABOUTME: Canonical link builder mapping (route name, identifier) to resource paths
// ABOUTME: Route templates are validated at startup so a missing route never defaults silently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

//! Link generation for recipe resources
//!
//! Links are a pure function of the route table and an identifier. The
//! table is independent of the router so handlers and tests can build the
//! same canonical paths without introspecting routing state.

use crate::constants::routes;
use crate::errors::{AppError, AppResult};
use crate::models::RecordId;
use std::collections::HashMap;
use std::fmt;

/// Named routes that have a canonical per-recipe link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    /// JSON resource for one recipe
    RecipeApi,
    /// UI page for one recipe
    RecipeUi,
}

impl RouteName {
    /// Every route the service expects to be registered
    pub const ALL: [Self; 2] = [Self::RecipeApi, Self::RecipeUi];
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecipeApi => write!(f, "recipe API resource"),
            Self::RecipeUi => write!(f, "recipe UI resource"),
        }
    }
}

/// Path templates keyed by route name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    templates: HashMap<RouteName, String>,
}

impl RouteTable {
    /// Empty table; use [`Self::register`] to add templates
    #[must_use]
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Table with the service's standard API and UI templates
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .register(RouteName::RecipeApi, routes::RECIPE_API_TEMPLATE)
            .register(RouteName::RecipeUi, routes::RECIPE_UI_TEMPLATE)
    }

    /// Add or replace the template for a route
    #[must_use]
    pub fn register(mut self, route: RouteName, template: impl Into<String>) -> Self {
        self.templates.insert(route, template.into());
        self
    }

    /// Check that every expected route is present and carries the id placeholder
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first offending route
    pub fn validate(&self) -> AppResult<()> {
        for route in RouteName::ALL {
            let template = self
                .templates
                .get(&route)
                .ok_or_else(|| AppError::config(format!("route {route} is not registered")))?;
            if !template.contains(routes::ID_PLACEHOLDER) {
                return Err(AppError::config(format!(
                    "route {route} template {template:?} lacks {}",
                    routes::ID_PLACEHOLDER
                )));
            }
        }
        Ok(())
    }

    /// Canonical path for one resource
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the route is not registered
    pub fn link(&self, route: RouteName, id: RecordId) -> AppResult<String> {
        self.templates
            .get(&route)
            .map(|template| template.replace(routes::ID_PLACEHOLDER, &id.to_string()))
            .ok_or_else(|| AppError::config(format!("route {route} is not registered")))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_standard_links() {
        let table = RouteTable::standard();
        assert!(table.validate().is_ok());
        assert_eq!(table.link(RouteName::RecipeApi, 42).unwrap(), "/api/recipes/42");
        assert_eq!(table.link(RouteName::RecipeUi, 42).unwrap(), "/recipes/42");
    }

    #[test]
    fn test_unregistered_route_is_config_error() {
        let table = RouteTable::empty().register(RouteName::RecipeApi, "/api/recipes/{id}");

        let err = table.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert!(err.message.contains("recipe UI resource"));

        let err = table.link(RouteName::RecipeUi, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_template_without_placeholder_fails_validation() {
        let table = RouteTable::standard().register(RouteName::RecipeUi, "/recipes");
        assert!(table.validate().is_err());
    }
}
