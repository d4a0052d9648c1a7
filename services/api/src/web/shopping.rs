//! services/api/src/web/shopping.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use fridge_core::ShoppingItem;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::dto::{RemovedCountResponse, ShoppingItemRequest, ShoppingItemResponse};
use crate::web::state::AppState;

/// The shopping list, unchecked items first.
#[utoipa::path(
    get,
    path = "/shopping",
    responses((status = 200, body = [ShoppingItemResponse]))
)]
pub async fn list_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<ShoppingItemResponse>> {
    let items = app_state.shopping.lock().await.items();
    Json(items.into_iter().map(ShoppingItemResponse::from).collect())
}

/// Add to the shopping list. Adding a name already on the list bumps its quantity.
#[utoipa::path(
    post,
    path = "/shopping",
    request_body = ShoppingItemRequest,
    responses(
        (status = 201, body = ShoppingItemResponse),
        (status = 400, description = "Invalid item")
    )
)]
pub async fn add_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<ShoppingItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = ShoppingItem::new(request.name.trim(), request.quantity, request.category);

    let mut shopping = app_state.shopping.lock().await;
    let id = shopping.add(item)?;
    let stored = shopping
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::Internal("shopping item vanished after insert".to_string()))?;

    Ok((StatusCode::CREATED, Json(ShoppingItemResponse::from(stored))))
}

/// Check or uncheck an item.
#[utoipa::path(
    post,
    path = "/shopping/{id}/toggle",
    params(("id" = Uuid, Path, description = "Shopping item id")),
    responses(
        (status = 200, body = ShoppingItemResponse),
        (status = 404, description = "No such item")
    )
)]
pub async fn toggle_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShoppingItemResponse>, ApiError> {
    let mut shopping = app_state.shopping.lock().await;
    shopping
        .toggle(id)
        .ok_or_else(|| ApiError::NotFound(format!("shopping item {}", id)))?;
    let item = shopping
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("shopping item {}", id)))?;
    Ok(Json(ShoppingItemResponse::from(item)))
}

#[utoipa::path(
    delete,
    path = "/shopping/{id}",
    params(("id" = Uuid, Path, description = "Shopping item id")),
    responses((status = 204, description = "Item removed"))
)]
pub async fn delete_handler(State(app_state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> StatusCode {
    app_state.shopping.lock().await.remove(id);
    StatusCode::NO_CONTENT
}

/// Drop every checked item.
#[utoipa::path(
    post,
    path = "/shopping/clear-checked",
    responses((status = 200, body = RemovedCountResponse))
)]
pub async fn clear_checked_handler(State(app_state): State<Arc<AppState>>) -> Json<RemovedCountResponse> {
    let removed = app_state.shopping.lock().await.clear_checked();
    Json(RemovedCountResponse { removed })
}
