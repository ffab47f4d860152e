// ABOUTME: Recipe domain models for list heads, full details, parts, and ingredients
// ABOUTME: Also defines the submission shape accepted by the create endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

//! Recipe data models
//!
//! Read-side types ([`RecipeHead`], [`RecipeDetail`], [`Part`], [`Ingredient`])
//! are built fresh for every request and serialize with camelCase keys.
//! Write-side types ([`NewRecipe`], [`NewPart`], [`NewIngredient`]) carry no
//! identifiers: the store assigns them. Unknown fields in a submission, such
//! as echoed `id` or link values, are ignored.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier shared by recipes, parts, and ingredients
pub type RecordId = i64;

/// Minimal listing representation of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeHead {
    /// Canonical API path for this recipe
    pub api_link: String,
    /// Canonical UI path for this recipe
    pub ui_link: String,
    /// Recipe identifier
    pub id: RecordId,
    /// Display label
    pub label: String,
    /// Tags in storage aggregation order
    pub tags: Vec<String>,
}

/// Full representation of a recipe including its part/ingredient tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    /// Head fields, flattened into the same JSON object
    #[serde(flatten)]
    pub head: RecipeHead,
    /// Free-text preparation instructions
    pub instructions: String,
    /// Parts in persisted sequence order
    pub parts: Vec<Part>,
}

/// A named sub-section of a recipe owning an ordered ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Part identifier, unique within its recipe
    pub id: RecordId,
    /// Label, possibly empty
    pub label: String,
    /// Ingredients in persisted sequence order
    pub ingredients: Vec<Ingredient>,
}

/// A single line item within a part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient identifier
    pub id: RecordId,
    /// Ingredient name
    pub name: String,
    /// Amount, 0 when unspecified
    pub quantity: f64,
    /// Unit of the amount, possibly empty
    pub unit: String,
    /// Free-text note, possibly empty
    pub note: String,
}

/// Recipe head columns as returned by the storage layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeHeadRow {
    /// Recipe identifier
    pub id: RecordId,
    /// Display label
    pub label: String,
    /// Instructions (empty for list queries)
    pub instructions: String,
    /// Comma-joined tag aggregate, absent when the recipe has no tags
    pub tags: Option<String>,
}

/// Submitted recipe for creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    /// Display label, must be non-empty
    pub label: String,
    /// Free-text instructions
    #[serde(default)]
    pub instructions: String,
    /// Tags to attach
    #[serde(default)]
    pub tags: Vec<String>,
    /// Parts in display order
    #[serde(default)]
    pub parts: Vec<NewPart>,
}

/// Submitted part
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewPart {
    /// Label, may be empty
    #[serde(default)]
    pub label: String,
    /// Ingredients in display order; empty names are placeholders
    #[serde(default)]
    pub ingredients: Vec<NewIngredient>,
}

/// Submitted ingredient
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewIngredient {
    /// Name; an empty name marks an unset placeholder row
    #[serde(default)]
    pub name: String,
    /// Amount; absent or null means 0
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Unit of the amount
    #[serde(default)]
    pub unit: String,
    /// Free-text note
    #[serde(default)]
    pub note: String,
}

impl NewIngredient {
    /// Whether this row is an unset placeholder that must not be persisted
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }

    /// Quantity with the unspecified case resolved to 0
    #[must_use]
    pub fn quantity_or_zero(&self) -> f64 {
        self.quantity.unwrap_or(0.0)
    }
}
