//! services/api/src/web/recipes.rs
//!
//! Recipe suggestion handlers. Calls to the recipe port are bounded by the
//! configured timeout; a slow or failed upstream surfaces as a retryable error.

use axum::{extract::State, Json};
use fridge_core::RecipeSummary;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::web::dto::{AddedCountResponse, RecipeDto, RecipeListResponse, RecipeSearchRequest};
use crate::web::state::AppState;

/// Upper bound on how many ingredients are sent to the recipe API at once.
const MAX_QUERY_INGREDIENTS: usize = 10;

/// Runs a recipe search with the configured timeout.
pub async fn search_recipes(
    app_state: &AppState,
    ingredients: &[String],
    limit: usize,
) -> Result<Vec<RecipeSummary>, ApiError> {
    let service = app_state.recipe_service()?;
    let timeout = app_state.config.recipe_timeout;

    match tokio::time::timeout(timeout, service.find_by_ingredients(ingredients, limit)).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            warn!("Recipe search timed out after {:?}", timeout);
            Err(ApiError::Timeout("recipe search, please try again".to_string()))
        }
    }
}

fn clean_ingredients(raw: Vec<String>) -> Vec<String> {
    let mut ingredients: Vec<String> = Vec::new();
    for name in raw {
        let name = name.trim().to_lowercase();
        if !name.is_empty() && !ingredients.contains(&name) {
            ingredients.push(name);
        }
    }
    ingredients.truncate(MAX_QUERY_INGREDIENTS);
    ingredients
}

/// Suggest recipes from what is in the fridge, favouring items that expire soonest.
#[utoipa::path(
    get,
    path = "/recipes/suggestions",
    responses(
        (status = 200, body = RecipeListResponse),
        (status = 502, description = "Recipe API failed"),
        (status = 503, description = "Recipe API not configured"),
        (status = 504, description = "Recipe API timed out")
    )
)]
pub async fn suggestions_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<RecipeListResponse>, ApiError> {
    let today = app_state.today();
    let names = app_state.inventory.lock().await.ingredient_names(today);
    let ingredients = clean_ingredients(names);

    let recipes = search_recipes(&app_state, &ingredients, app_state.config.recipe_result_limit).await?;
    info!("Found {} recipe suggestions", recipes.len());

    Ok(Json(RecipeListResponse {
        ingredients,
        recipes: recipes.into_iter().map(RecipeDto::from).collect(),
    }))
}

/// Search recipes for an explicit ingredient list.
#[utoipa::path(
    post,
    path = "/recipes/search",
    request_body = RecipeSearchRequest,
    responses(
        (status = 200, body = RecipeListResponse),
        (status = 502, description = "Recipe API failed"),
        (status = 503, description = "Recipe API not configured"),
        (status = 504, description = "Recipe API timed out")
    )
)]
pub async fn search_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<RecipeSearchRequest>,
) -> Result<Json<RecipeListResponse>, ApiError> {
    let ingredients = clean_ingredients(request.ingredients);
    let limit = request
        .limit
        .unwrap_or(app_state.config.recipe_result_limit)
        .min(app_state.config.recipe_result_limit.max(1));

    let recipes = search_recipes(&app_state, &ingredients, limit).await?;

    Ok(Json(RecipeListResponse {
        ingredients,
        recipes: recipes.into_iter().map(RecipeDto::from).collect(),
    }))
}

/// Put a recipe's missing ingredients on the shopping list.
#[utoipa::path(
    post,
    path = "/recipes/missing-to-shopping",
    request_body = RecipeDto,
    responses((status = 200, body = AddedCountResponse))
)]
pub async fn missing_to_shopping_handler(
    State(app_state): State<Arc<AppState>>,
    Json(recipe): Json<RecipeDto>,
) -> Json<AddedCountResponse> {
    let recipe = RecipeSummary::from(recipe);
    let added = app_state.shopping.lock().await.add_missing_ingredients(&recipe);
    info!("Added {} ingredients from '{}' to the shopping list", added, recipe.title);
    Json(AddedCountResponse { added })
}
