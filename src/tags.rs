// ABOUTME: Tag parser splitting the storage layer's comma-joined tag aggregate
// ABOUTME: Absent or empty aggregates yield an empty list; tokens pass through verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

/// Separator used by `GROUP_CONCAT` when aggregating tag rows
pub const TAG_SEPARATOR: char = ',';

/// Split an aggregated tag string into its tokens
///
/// No trimming, de-duplication, or case folding is applied. An empty
/// aggregate is treated like an absent one.
#[must_use]
pub fn parse_tags(aggregate: Option<&str>) -> Vec<String> {
    match aggregate {
        Some(joined) if !joined.is_empty() => {
            joined.split(TAG_SEPARATOR).map(str::to_owned).collect()
        }
        _ => Vec::new(),
    }
}
