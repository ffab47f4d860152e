// ABOUTME: Recipe list, read, and create logic composed from the store, link builder, and assembler
// ABOUTME: Protocol-agnostic so route handlers stay thin and tests can substitute the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

use std::sync::Arc;

use crate::assembly::assemble_parts;
use crate::database::RecipeStore;
use crate::errors::{AppError, AppResult};
use crate::links::{RouteName, RouteTable};
use crate::models::{NewRecipe, RecipeDetail, RecipeHead, RecipeHeadRow, RecordId};
use crate::tags::{parse_tags, TAG_SEPARATOR};
use tracing::{debug, error};

/// Recipe operations shared by every request handler
#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
    links: Arc<RouteTable>,
}

impl RecipeService {
    /// Build the service over a store and a validated route table
    #[must_use]
    pub fn new(store: Arc<dyn RecipeStore>, links: RouteTable) -> Self {
        Self {
            store,
            links: Arc::new(links),
        }
    }

    /// Storage collaborator, used by readiness checks
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RecipeStore> {
        &self.store
    }

    /// All recipes ordered by label, empty when none exist
    ///
    /// # Errors
    ///
    /// Returns a database error if the list query fails
    pub async fn list_recipes(&self) -> AppResult<Vec<RecipeHead>> {
        let rows = self.store.list_heads().await?;
        debug!(count = rows.len(), "Listed recipes");
        rows.into_iter().map(|row| self.head(row).map(|(head, _)| head)).collect()
    }

    /// Full recipe with its part/ingredient tree
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no recipe has this id, or a database
    /// error if either query fails
    pub async fn get_recipe(&self, id: RecordId) -> AppResult<RecipeDetail> {
        let row = self
            .store
            .find_head(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;
        let (head, instructions) = self.head(row)?;

        let parts = assemble_parts(self.store.part_rows(id).await?);
        debug!(recipe.id = id, recipe.parts = parts.len(), "Loaded recipe");

        Ok(RecipeDetail {
            head,
            instructions,
            parts,
        })
    }

    /// Persist a submission and return the canonical UI link of the new recipe
    ///
    /// The store call runs on its own task: once started, the transaction
    /// resolves to commit or rollback even if this future is dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unusable label or tag, otherwise any
    /// error raised while writing
    pub async fn create_recipe(&self, recipe: NewRecipe) -> AppResult<String> {
        validate_submission(&recipe)?;

        let store = Arc::clone(&self.store);
        let id = tokio::spawn(async move { store.create(&recipe).await })
            .await
            .map_err(|e| {
                error!(error = %e, "Recipe creation task failed");
                AppError::internal(format!("Recipe creation task failed: {e}"))
            })??;

        self.links.link(RouteName::RecipeUi, id)
    }

    fn head(&self, row: RecipeHeadRow) -> AppResult<(RecipeHead, String)> {
        let head = RecipeHead {
            api_link: self.links.link(RouteName::RecipeApi, row.id)?,
            ui_link: self.links.link(RouteName::RecipeUi, row.id)?,
            id: row.id,
            label: row.label,
            tags: parse_tags(row.tags.as_deref()),
        };
        Ok((head, row.instructions))
    }
}

/// Reject submissions the schema or the tag aggregate cannot represent
///
/// Empty ingredient names are not an error; the store skips them.
///
/// # Errors
///
/// Returns `InvalidInput` describing the first problem found
pub fn validate_submission(recipe: &NewRecipe) -> AppResult<()> {
    if recipe.label.trim().is_empty() {
        return Err(AppError::invalid_input("Recipe label must not be empty"));
    }
    for tag in &recipe.tags {
        if tag.is_empty() {
            return Err(AppError::invalid_input("Tags must not be empty"));
        }
        if tag.contains(TAG_SEPARATOR) {
            return Err(AppError::invalid_input(format!(
                "Tag {tag:?} must not contain {TAG_SEPARATOR:?}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::PartRow;
    use crate::errors::ErrorCode;
    use crate::models::{Ingredient, NewIngredient, NewPart};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeStore {
        heads: Vec<RecipeHeadRow>,
        rows: Vec<PartRow>,
        created: Mutex<Vec<NewRecipe>>,
    }

    #[async_trait]
    impl RecipeStore for FakeStore {
        async fn list_heads(&self) -> AppResult<Vec<RecipeHeadRow>> {
            Ok(self.heads.clone())
        }

        async fn find_head(&self, id: RecordId) -> AppResult<Option<RecipeHeadRow>> {
            Ok(self.heads.iter().find(|h| h.id == id).cloned())
        }

        async fn part_rows(&self, _id: RecordId) -> AppResult<Vec<PartRow>> {
            Ok(self.rows.clone())
        }

        async fn create(&self, recipe: &NewRecipe) -> AppResult<RecordId> {
            let mut created = self.created.lock().unwrap();
            created.push(recipe.clone());
            Ok(i64::try_from(created.len()).unwrap() + 40)
        }

        async fn ping(&self) -> AppResult<()> {
            Ok(())
        }
    }

    fn head_row(id: RecordId, label: &str, tags: Option<&str>) -> RecipeHeadRow {
        RecipeHeadRow {
            id,
            label: label.to_owned(),
            instructions: "Stir.".to_owned(),
            tags: tags.map(str::to_owned),
        }
    }

    fn submission(label: &str) -> NewRecipe {
        NewRecipe {
            label: label.to_owned(),
            instructions: String::new(),
            tags: Vec::new(),
            parts: vec![NewPart {
                label: "Base".to_owned(),
                ingredients: vec![NewIngredient {
                    name: "Water".to_owned(),
                    ..NewIngredient::default()
                }],
            }],
        }
    }

    fn service(store: FakeStore) -> (RecipeService, Arc<FakeStore>) {
        let store = Arc::new(store);
        let svc = RecipeService::new(Arc::clone(&store) as Arc<dyn RecipeStore>, RouteTable::standard());
        (svc, store)
    }

    #[tokio::test]
    async fn test_list_builds_links_and_tags() {
        let (svc, _) = service(FakeStore {
            heads: vec![head_row(3, "Apple Pie", Some("sweet,baked")), head_row(1, "Broth", None)],
            ..FakeStore::default()
        });

        let heads = svc.list_recipes().await.unwrap();
        assert_eq!(heads.len(), 2);
        assert_eq!(heads[0].api_link, "/api/recipes/3");
        assert_eq!(heads[0].ui_link, "/recipes/3");
        assert_eq!(heads[0].tags, vec!["sweet", "baked"]);
        assert!(heads[1].tags.is_empty());
    }

    #[tokio::test]
    async fn test_list_empty_is_empty_vec() {
        let (svc, _) = service(FakeStore::default());
        assert!(svc.list_recipes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (svc, _) = service(FakeStore::default());
        let err = svc.get_recipe(99).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
    }

    #[tokio::test]
    async fn test_get_assembles_parts() {
        let water = Ingredient {
            id: 5,
            name: "Water".to_owned(),
            quantity: 1.0,
            unit: "L".to_owned(),
            note: String::new(),
        };
        let (svc, _) = service(FakeStore {
            heads: vec![head_row(2, "Soup", None)],
            rows: vec![
                PartRow {
                    part_id: 8,
                    part_label: "Base".to_owned(),
                    ingredient: Some(water),
                },
                PartRow {
                    part_id: 9,
                    part_label: "Garnish".to_owned(),
                    ingredient: None,
                },
            ],
            ..FakeStore::default()
        });

        let detail = svc.get_recipe(2).await.unwrap();
        assert_eq!(detail.instructions, "Stir.");
        assert_eq!(detail.parts.len(), 2);
        assert_eq!(detail.parts[0].ingredients[0].name, "Water");
        assert!(detail.parts[1].ingredients.is_empty());
    }

    #[tokio::test]
    async fn test_create_returns_ui_link() {
        let (svc, store) = service(FakeStore::default());
        let link = svc.create_recipe(submission("Soup")).await.unwrap();

        assert_eq!(link, "/recipes/41");
        assert_eq!(store.created.lock().unwrap()[0].label, "Soup");
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input_before_store() {
        let (svc, store) = service(FakeStore::default());

        let err = svc.create_recipe(submission("  ")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let mut tagged = submission("Soup");
        tagged.tags = vec!["hot,cold".to_owned()];
        let err = svc.create_recipe(tagged).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        assert!(store.created.lock().unwrap().is_empty());
    }
}
