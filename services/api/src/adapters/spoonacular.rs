//! services/api/src/adapters/spoonacular.rs
//!
//! This module contains the adapter for the Spoonacular recipe API.
//! It implements the `RecipeService` port from the `core` crate using the
//! `findByIngredients` endpoint.

use async_trait::async_trait;
use fridge_core::domain::RecipeSummary;
use fridge_core::ports::{PortError, PortResult, RecipeService};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `RecipeService` port using the Spoonacular HTTP API.
#[derive(Clone)]
pub struct SpoonacularAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SpoonacularAdapter {
    /// Creates a new `SpoonacularAdapter`. `base_url` must not end with a slash.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

//=========================================================================================
// "Impure" Wire Records
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeRecord {
    id: i64,
    title: String,
    image: Option<String>,
    #[serde(default)]
    used_ingredients: Vec<IngredientRecord>,
    #[serde(default)]
    missed_ingredients: Vec<IngredientRecord>,
}

#[derive(Deserialize)]
struct IngredientRecord {
    name: String,
}

impl RecipeRecord {
    fn into_domain(self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            title: self.title,
            image_url: self.image.filter(|url| !url.is_empty()),
            used_ingredients: self.used_ingredients.into_iter().map(|i| i.name).collect(),
            missing_ingredients: self.missed_ingredients.into_iter().map(|i| i.name).collect(),
        }
    }
}

/// Decodes a `findByIngredients` response body.
pub fn parse_recipes(body: &str) -> PortResult<Vec<RecipeSummary>> {
    let records: Vec<RecipeRecord> = serde_json::from_str(body)
        .map_err(|e| PortError::Unexpected(format!("Failed to decode recipes: {}", e)))?;
    Ok(records.into_iter().map(RecipeRecord::into_domain).collect())
}

//=========================================================================================
// `RecipeService` Trait Implementation
//=========================================================================================

#[async_trait]
impl RecipeService for SpoonacularAdapter {
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
        limit: usize,
    ) -> PortResult<Vec<RecipeSummary>> {
        if ingredients.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let url = format!("{}/recipes/findByIngredients", self.base_url);
        debug!(count = ingredients.len(), limit, "Querying recipes by ingredients");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ingredients", ingredients.join(",")),
                ("number", limit.to_string()),
                ("apiKey", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| PortError::Unexpected(format!("Recipe request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::PAYMENT_REQUIRED {
            warn!(%status, "Recipe API rejected the key or the quota is exhausted");
            return Err(PortError::Unavailable(format!("Recipe API returned {}", status)));
        }
        if !status.is_success() {
            return Err(PortError::Unexpected(format!("Recipe API returned {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PortError::Unexpected(format!("Failed to read recipe response: {}", e)))?;

        parse_recipes(&body)
    }
}
