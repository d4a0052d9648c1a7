//! services/api/src/web/scan.rs
//!
//! Handlers for the capture flows. The client does the barcode decoding and the
//! text recognition; these endpoints interpret what it read.

use axum::{extract::State, Json};
use fridge_core::expiry;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::web::dto::{
    BarcodeScanRequest, BarcodeScanResponse, ExpiryScanRequest, ExpiryScanResponse,
    InventoryItemResponse, ProductGuessResponse,
};
use crate::web::state::AppState;

/// Guess a product from a scanned barcode, optionally adding it to the inventory.
#[utoipa::path(
    post,
    path = "/scan/barcode",
    request_body = BarcodeScanRequest,
    responses((status = 200, description = "`guess` is null when the barcode is not recognised", body = BarcodeScanResponse))
)]
pub async fn barcode_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<BarcodeScanRequest>,
) -> Json<BarcodeScanResponse> {
    let Some(guess) = app_state.services.catalog.lookup(&request.barcode) else {
        debug!("No product guess for barcode '{}'", request.barcode);
        return Json(BarcodeScanResponse {
            guess: None,
            added: None,
        });
    };

    let added = if request.add_to_inventory {
        let today = app_state.today();
        let item = guess.clone().into_item(Uuid::new_v4(), today);
        info!("Adding scanned '{}' to inventory", item.name);
        app_state.inventory.lock().await.add(item.clone());
        Some(InventoryItemResponse::from_domain(item, today))
    } else {
        None
    };

    Json(BarcodeScanResponse {
        guess: Some(ProductGuessResponse::from(guess)),
        added,
    })
}

/// Find an expiration date in recognised label text.
#[utoipa::path(
    post,
    path = "/scan/expiry",
    request_body = ExpiryScanRequest,
    responses((status = 200, body = ExpiryScanResponse))
)]
pub async fn expiry_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<ExpiryScanRequest>,
) -> Json<ExpiryScanResponse> {
    let today = app_state.today();
    let token = expiry::extract_from_lines(request.lines.iter().map(String::as_str), today);

    Json(match token {
        Some(token) => ExpiryScanResponse {
            token: Some(token.normalized()),
            expiration_date: token.last_day(),
            message: format!("Found expiration date {}", token),
        },
        None => ExpiryScanResponse {
            token: None,
            expiration_date: None,
            message: "No valid date found".to_string(),
        },
    })
}
