// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Services depend on storage only through the RecipeStore seam
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

//! Domain service layer
//!
//! Route handlers parse the request and delegate here; everything that
//! needs a rule (validation, link building, tree assembly) lives in a service.

/// Recipe listing, detail, and creation
pub mod recipes;

pub use recipes::RecipeService;
