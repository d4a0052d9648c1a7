//! services/api/src/web/rest.rs
//!
//! Contains the master definition for the OpenAPI specification and the
//! service health endpoint.

use crate::web::dto::*;
use crate::web::state::AppState;
use crate::web::{budget, inventory, meal_plan, preferences, recipes, scan, shopping, voice};
use axum::{extract::State, Json};
use std::sync::Arc;
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        inventory::list_items_handler,
        inventory::create_item_handler,
        inventory::get_item_handler,
        inventory::update_item_handler,
        inventory::delete_item_handler,
        inventory::list_category_handler,
        inventory::remove_expired_handler,
        inventory::alerts_handler,
        scan::barcode_handler,
        scan::expiry_handler,
        recipes::suggestions_handler,
        recipes::search_handler,
        recipes::missing_to_shopping_handler,
        shopping::list_handler,
        shopping::add_handler,
        shopping::toggle_handler,
        shopping::delete_handler,
        shopping::clear_checked_handler,
        meal_plan::week_handler,
        meal_plan::schedule_handler,
        meal_plan::delete_handler,
        budget::list_expenses_handler,
        budget::record_expense_handler,
        budget::delete_expense_handler,
        budget::summary_handler,
        preferences::get_handler,
        preferences::update_handler,
        voice::command_handler,
        voice::audio_handler,
        voice::speak_handler,
    ),
    components(
        schemas(
            InventoryItemResponse,
            InventoryItemRequest,
            ExpiryAlertsResponse,
            RemovedCountResponse,
            BarcodeScanRequest,
            ProductGuessResponse,
            BarcodeScanResponse,
            ExpiryScanRequest,
            ExpiryScanResponse,
            RecipeDto,
            RecipeSearchRequest,
            RecipeListResponse,
            AddedCountResponse,
            ShoppingItemRequest,
            ShoppingItemResponse,
            MealPlanRequest,
            MealPlanEntryResponse,
            ExpenseRequest,
            ExpenseResponse,
            CategorySpend,
            BudgetSummaryResponse,
            PreferencesDto,
            VoiceCommandRequest,
            VoiceCommandResponse,
            SpeakRequest,
            HealthResponse,
        )
    ),
    tags(
        (name = "Fridge Inventory API", description = "Track what is in the fridge, when it expires, and what to cook or buy next.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Health
//=========================================================================================

/// Liveness probe. Also reports which optional integrations are configured.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, body = HealthResponse))
)]
pub async fn health_handler(State(app_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        today: app_state.today(),
        recipes_enabled: app_state.services.recipes.is_some(),
        voice_audio_enabled: app_state.services.stt_adapter.is_some(),
    })
}
