// ABOUTME: Folds the flat, ordered part/ingredient join rows into the Part -> Ingredient tree
// ABOUTME: Single left-to-right scan grouping contiguous runs of the same part identifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

//! Recipe tree assembly
//!
//! The part query returns one row per ingredient, already ordered by part
//! sequence and then ingredient sequence. [`assemble_parts`] trusts that
//! order: rows of one part must be contiguous. It groups runs, it does not
//! sort and it does not detect out-of-order input.
//!
//! Parts are driven from the `parts` table with a left join onto
//! `ingredients`, so a part without ingredients arrives as a single row
//! whose [`PartRow::ingredient`] is `None`. Such a row opens the part and
//! appends nothing. A query that joined the other way round could never
//! produce those rows and would silently drop empty parts.

use crate::models::{Ingredient, Part, RecordId};

/// One row of the flat part/ingredient join
#[derive(Debug, Clone, PartialEq)]
pub struct PartRow {
    /// Identifier of the part the row belongs to
    pub part_id: RecordId,
    /// Label of that part
    pub part_label: String,
    /// Ingredient carried by the row, absent for a part without ingredients
    pub ingredient: Option<Ingredient>,
}

/// Group contiguous rows into parts, preserving input order
///
/// At a boundary row the finished part is flushed first and the row's
/// ingredient goes to the part it names.
pub fn assemble_parts<I>(rows: I) -> Vec<Part>
where
    I: IntoIterator<Item = PartRow>,
{
    let mut parts = Vec::new();
    let mut current: Option<Part> = None;

    for row in rows {
        let starts_new_part = current.as_ref().map_or(true, |part| part.id != row.part_id);
        if starts_new_part {
            parts.extend(current.take());
            current = Some(Part {
                id: row.part_id,
                label: row.part_label,
                ingredients: Vec::new(),
            });
        }

        if let (Some(part), Some(ingredient)) = (current.as_mut(), row.ingredient) {
            part.ingredients.push(ingredient);
        }
    }

    parts.extend(current);
    parts
}
