//! Bill handlers: creation and history.
//!
//! Creation delegates entirely to the billing engine; a bill either commits
//! in full (stock decrements plus invoice) or not at all.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::dto::{BillDto, CreateBillRequest};
use crate::error::ApiError;
use crate::AppState;

/// `POST /bills`
pub async fn create_bill(
    State(state): State<AppState>,
    Json(req): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let request = req.into_new_invoice()?;

    let (invoice, lines) = state.billing.create_invoice(request).await?;

    info!(bill_id = %invoice.id, "Bill created");

    let bill_id = invoice.id.clone();
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Bill created successfully",
            "bill": BillDto::from((invoice, lines)),
            "billId": bill_id,
        })),
    ))
}

/// `GET /bills` (newest first)
pub async fn list_bills(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let bills = state.db.invoices().list_with_lines().await?;
    let bills: Vec<BillDto> = bills.into_iter().map(BillDto::from).collect();

    Ok(Json(json!({
        "success": true,
        "bills": bills,
    })))
}

/// `GET /bills/{id}`
pub async fn get_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let bill = state
        .db
        .invoices()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Bill not found"))?;

    Ok(Json(json!({
        "success": true,
        "bill": BillDto::from(bill),
    })))
}
