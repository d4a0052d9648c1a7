//! services/api/src/web/meal_plan.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use fridge_core::MealPlanEntry;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::dto::{MealPlanEntryResponse, MealPlanQuery, MealPlanRequest};
use crate::web::state::AppState;

/// Meals for the seven days starting at `start` (today by default).
#[utoipa::path(
    get,
    path = "/meal-plan",
    params(MealPlanQuery),
    responses((status = 200, body = [MealPlanEntryResponse]))
)]
pub async fn week_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<MealPlanQuery>,
) -> Json<Vec<MealPlanEntryResponse>> {
    let start = query.start.unwrap_or_else(|| app_state.today());
    let entries = app_state.meal_plan.lock().await.week_from(start);
    Json(entries.into_iter().map(MealPlanEntryResponse::from).collect())
}

#[utoipa::path(
    post,
    path = "/meal-plan",
    request_body = MealPlanRequest,
    responses(
        (status = 201, body = MealPlanEntryResponse),
        (status = 400, description = "Invalid entry")
    )
)]
pub async fn schedule_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<MealPlanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = MealPlanEntry {
        id: Uuid::new_v4(),
        date: request.date,
        slot: request.slot,
        title: request.title.trim().to_string(),
        recipe_id: request.recipe_id,
    };
    app_state.meal_plan.lock().await.schedule(entry.clone())?;
    Ok((StatusCode::CREATED, Json(MealPlanEntryResponse::from(entry))))
}

#[utoipa::path(
    delete,
    path = "/meal-plan/{id}",
    params(("id" = Uuid, Path, description = "Meal plan entry id")),
    responses((status = 204, description = "Entry removed"))
)]
pub async fn delete_handler(State(app_state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> StatusCode {
    app_state.meal_plan.lock().await.remove(id);
    StatusCode::NO_CONTENT
}
