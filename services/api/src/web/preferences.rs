//! services/api/src/web/preferences.rs

use axum::{extract::State, Json};
use fridge_core::{preferences, Preferences};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::web::dto::PreferencesDto;
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/preferences",
    responses((status = 200, body = PreferencesDto))
)]
pub async fn get_handler(State(app_state): State<Arc<AppState>>) -> Json<PreferencesDto> {
    let prefs = app_state.preferences.lock().await.clone();
    Json(PreferencesDto::from(prefs))
}

#[utoipa::path(
    put,
    path = "/preferences",
    request_body = PreferencesDto,
    responses(
        (status = 200, body = PreferencesDto),
        (status = 400, description = "Invalid preferences")
    )
)]
pub async fn update_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<PreferencesDto>,
) -> Result<Json<PreferencesDto>, ApiError> {
    let prefs = Preferences::from(request);
    preferences::validate(&prefs)?;

    *app_state.preferences.lock().await = prefs.clone();
    info!("Preferences updated");
    Ok(Json(PreferencesDto::from(prefs)))
}
