//! services/api/src/web/budget.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Datelike;
use fridge_core::Expense;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::dto::{
    BudgetSummaryResponse, CategorySpend, ExpenseRequest, ExpenseResponse, MonthQuery,
};
use crate::web::state::AppState;

/// Resolves a month query against today, rejecting impossible months.
fn resolve_month(app_state: &AppState, query: &MonthQuery) -> Result<(i32, u32), ApiError> {
    let today = app_state.today();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());
    if !(1..=12).contains(&month) {
        return Err(ApiError::BadRequest(format!("month must be 1-12, got {}", month)));
    }
    Ok((year, month))
}

#[utoipa::path(
    get,
    path = "/budget/expenses",
    params(MonthQuery),
    responses((status = 200, body = [ExpenseResponse]))
)]
pub async fn list_expenses_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let (year, month) = resolve_month(&app_state, &query)?;
    let expenses = app_state.budget.lock().await.expenses_in_month(year, month);
    Ok(Json(expenses.into_iter().map(ExpenseResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/budget/expenses",
    request_body = ExpenseRequest,
    responses(
        (status = 201, body = ExpenseResponse),
        (status = 400, description = "Invalid expense")
    )
)]
pub async fn record_expense_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<ExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = Expense {
        id: Uuid::new_v4(),
        description: request.description.trim().to_string(),
        amount_cents: request.amount_cents,
        date: request.date.unwrap_or_else(|| app_state.today()),
        category: request.category,
    };
    app_state.budget.lock().await.record(expense.clone())?;
    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(expense))))
}

#[utoipa::path(
    delete,
    path = "/budget/expenses/{id}",
    params(("id" = Uuid, Path, description = "Expense id")),
    responses((status = 204, description = "Expense removed"))
)]
pub async fn delete_expense_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    app_state.budget.lock().await.remove(id);
    StatusCode::NO_CONTENT
}

/// Spending against the monthly budget from the user's preferences.
#[utoipa::path(
    get,
    path = "/budget/summary",
    params(MonthQuery),
    responses((status = 200, body = BudgetSummaryResponse))
)]
pub async fn summary_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<BudgetSummaryResponse>, ApiError> {
    let (year, month) = resolve_month(&app_state, &query)?;
    let limit_cents = app_state.preferences.lock().await.monthly_budget_cents;

    let budget = app_state.budget.lock().await;
    let spent_cents = budget.spent_in_month(year, month);
    let remaining_cents = limit_cents.map(|limit| budget.remaining_in_month(limit, year, month));
    let by_category = budget
        .by_category(year, month)
        .into_iter()
        .map(|(category, amount_cents)| CategorySpend {
            category,
            amount_cents,
        })
        .collect();

    Ok(Json(BudgetSummaryResponse {
        year,
        month,
        spent_cents,
        limit_cents,
        remaining_cents,
        by_category,
    }))
}
