//! services/api/src/web/inventory.rs
//!
//! Axum handlers for the fridge inventory.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use fridge_core::{domain::UnknownCategory, Category, InventoryItem, SortOption};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::dto::{
    ExpiryAlertsResponse, InventoryItemRequest, InventoryItemResponse, InventoryQuery,
    RemovedCountResponse,
};
use crate::web::state::AppState;

fn item_from_request(id: Uuid, request: InventoryItemRequest) -> Result<InventoryItem, ApiError> {
    let item = InventoryItem {
        id,
        name: request.name.trim().to_string(),
        category: request.category,
        expiration_date: request.expiration_date,
        quantity: request.quantity,
    };
    item.validate()?;
    Ok(item)
}

/// List inventory items, optionally filtered by name and sorted.
#[utoipa::path(
    get,
    path = "/inventory",
    params(InventoryQuery),
    responses((status = 200, description = "All inventory items", body = [InventoryItemResponse]))
)]
pub async fn list_items_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<InventoryQuery>,
) -> Json<Vec<InventoryItemResponse>> {
    let today = app_state.today();
    let inventory = app_state.inventory.lock().await;
    let items = match query.q.as_deref() {
        Some(q) if !q.trim().is_empty() => inventory.search(q, query.sort),
        _ => inventory.items(query.sort),
    };
    Json(InventoryItemResponse::list(items, today))
}

/// Add an item to the inventory.
#[utoipa::path(
    post,
    path = "/inventory",
    request_body = InventoryItemRequest,
    responses(
        (status = 201, description = "Item created", body = InventoryItemResponse),
        (status = 400, description = "Invalid item")
    )
)]
pub async fn create_item_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<InventoryItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = item_from_request(Uuid::new_v4(), request)?;
    info!("Adding '{}' to inventory", item.name);

    app_state.inventory.lock().await.add(item.clone());
    let response = InventoryItemResponse::from_domain(item, app_state.today());
    Ok((StatusCode::CREATED, Json(response)))
}

/// Fetch one inventory item.
#[utoipa::path(
    get,
    path = "/inventory/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, body = InventoryItemResponse),
        (status = 404, description = "No such item")
    )
)]
pub async fn get_item_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<InventoryItemResponse>, ApiError> {
    let item = app_state
        .inventory
        .lock()
        .await
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("inventory item {}", id)))?;
    Ok(Json(InventoryItemResponse::from_domain(item, app_state.today())))
}

/// Replace an inventory item.
#[utoipa::path(
    put,
    path = "/inventory/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    request_body = InventoryItemRequest,
    responses(
        (status = 200, body = InventoryItemResponse),
        (status = 404, description = "No such item")
    )
)]
pub async fn update_item_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<InventoryItemRequest>,
) -> Result<Json<InventoryItemResponse>, ApiError> {
    let item = item_from_request(id, request)?;

    if !app_state.inventory.lock().await.update(item.clone()) {
        return Err(ApiError::NotFound(format!("inventory item {}", id)));
    }
    Ok(Json(InventoryItemResponse::from_domain(item, app_state.today())))
}

/// Delete an inventory item. Deleting an unknown id is not an error.
#[utoipa::path(
    delete,
    path = "/inventory/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    responses((status = 204, description = "Item removed"))
)]
pub async fn delete_item_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if let Some(item) = app_state.inventory.lock().await.remove(id) {
        info!("Removed '{}' from inventory", item.name);
    }
    StatusCode::NO_CONTENT
}

/// List items in one category.
#[utoipa::path(
    get,
    path = "/inventory/category/{category}",
    params(
        ("category" = String, Path, description = "vegetable, fruit, dairy or meat"),
        InventoryQuery
    ),
    responses(
        (status = 200, body = [InventoryItemResponse]),
        (status = 400, description = "Unknown category")
    )
)]
pub async fn list_category_handler(
    State(app_state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<Vec<InventoryItemResponse>>, ApiError> {
    let category: Category = category
        .parse()
        .map_err(|e: UnknownCategory| ApiError::BadRequest(e.to_string()))?;
    let today = app_state.today();
    let items = app_state.inventory.lock().await.items_in(category, query.sort);
    Ok(Json(InventoryItemResponse::list(items, today)))
}

/// Remove every item whose expiration date has passed.
#[utoipa::path(
    post,
    path = "/inventory/remove-expired",
    responses((status = 200, body = RemovedCountResponse))
)]
pub async fn remove_expired_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<RemovedCountResponse> {
    let today = app_state.today();
    let removed = app_state.inventory.lock().await.remove_expired(today);
    info!("Removed {} expired items", removed);
    Json(RemovedCountResponse { removed })
}

/// Expired items and items expiring within the configured alert window.
#[utoipa::path(
    get,
    path = "/inventory/alerts",
    responses((status = 200, body = ExpiryAlertsResponse))
)]
pub async fn alerts_handler(State(app_state): State<Arc<AppState>>) -> Json<ExpiryAlertsResponse> {
    let today = app_state.today();
    let alert_days = app_state.preferences.lock().await.expiry_alert_days;

    let (expired, expiring) = {
        let inventory = app_state.inventory.lock().await;
        let expired: Vec<_> = inventory
            .items(Some(SortOption::ExpiryAsc))
            .into_iter()
            .filter(|item| item.is_expired(today))
            .collect();
        (expired, inventory.expiring_within(today, alert_days))
    };

    Json(ExpiryAlertsResponse {
        alert_days,
        expired: InventoryItemResponse::list(expired, today),
        expiring: InventoryItemResponse::list(expiring, today),
    })
}
