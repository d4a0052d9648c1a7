pub mod budget;
pub mod dto;
pub mod inventory;
pub mod meal_plan;
pub mod preferences;
pub mod recipes;
pub mod rest;
pub mod scan;
pub mod shopping;
pub mod state;
pub mod voice;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::{ACCEPT, CONTENT_TYPE}, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};

pub use rest::{health_handler, ApiDoc};
pub use state::{AppState, Services};

/// Voice clips are short; anything past this is rejected before it reaches the STT adapter.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Builds the complete API router. The binary merges Swagger UI on top; tests drive it directly.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    let inventory_routes = Router::new()
        .route(
            "/inventory",
            get(inventory::list_items_handler).post(inventory::create_item_handler),
        )
        .route("/inventory/alerts", get(inventory::alerts_handler))
        .route("/inventory/remove-expired", post(inventory::remove_expired_handler))
        .route("/inventory/category/{category}", get(inventory::list_category_handler))
        .route(
            "/inventory/{id}",
            get(inventory::get_item_handler)
                .put(inventory::update_item_handler)
                .delete(inventory::delete_item_handler),
        );

    let scan_routes = Router::new()
        .route("/scan/barcode", post(scan::barcode_handler))
        .route("/scan/expiry", post(scan::expiry_handler));

    let recipe_routes = Router::new()
        .route("/recipes/suggestions", get(recipes::suggestions_handler))
        .route("/recipes/search", post(recipes::search_handler))
        .route("/recipes/missing-to-shopping", post(recipes::missing_to_shopping_handler));

    let shopping_routes = Router::new()
        .route("/shopping", get(shopping::list_handler).post(shopping::add_handler))
        .route("/shopping/clear-checked", post(shopping::clear_checked_handler))
        .route("/shopping/{id}/toggle", post(shopping::toggle_handler))
        .route("/shopping/{id}", delete(shopping::delete_handler));

    let planning_routes = Router::new()
        .route("/meal-plan", get(meal_plan::week_handler).post(meal_plan::schedule_handler))
        .route("/meal-plan/{id}", delete(meal_plan::delete_handler))
        .route(
            "/budget/expenses",
            get(budget::list_expenses_handler).post(budget::record_expense_handler),
        )
        .route("/budget/expenses/{id}", delete(budget::delete_expense_handler))
        .route("/budget/summary", get(budget::summary_handler))
        .route(
            "/preferences",
            get(preferences::get_handler).put(preferences::update_handler),
        );

    let voice_routes = Router::new()
        .route("/voice/command", post(voice::command_handler))
        .route("/voice/audio", post(voice::audio_handler))
        .route("/voice/speak", post(voice::speak_handler));

    Router::new()
        .route("/health", get(health_handler))
        .merge(inventory_routes)
        .merge(scan_routes)
        .merge(recipe_routes)
        .merge(shopping_routes)
        .merge(planning_routes)
        .merge(voice_routes)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
