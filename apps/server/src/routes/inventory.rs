//! Inventory CRUD handlers.
//!
//! All payload validation happens here, before any storage call; the
//! repository enforces code uniqueness and non-negative stock as backstops.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use vendo_core::validation::{parse_money, validate_item_code, validate_stock, validate_text};
use vendo_core::InventoryItem;

use crate::dto::{ItemDto, ItemRequest};
use crate::error::ApiError;
use crate::AppState;

fn validate_item_request(req: &ItemRequest) -> Result<(), ApiError> {
    validate_item_code(&req.item_code)?;
    validate_text("name", &req.name)?;
    validate_text("description", &req.description)?;
    validate_stock(req.quantity)?;
    Ok(())
}

/// `POST /inventory`
pub async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<ItemRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    validate_item_request(&req)?;
    let price = parse_money("price", req.price)?;

    let item = InventoryItem::new(
        req.item_code.trim().to_string(),
        req.name.trim().to_string(),
        Some(req.description.trim().to_string()),
        price,
        req.quantity,
    );

    state.db.inventory().insert(&item).await?;

    info!(item_id = %item.id, code = %item.item_code, "Inventory item created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Item added successfully",
            "item": ItemDto::from(item),
        })),
    ))
}

/// `GET /inventory`
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let items = state.db.inventory().list().await?;
    let items: Vec<ItemDto> = items.into_iter().map(ItemDto::from).collect();

    Ok(Json(json!({
        "success": true,
        "items": items,
    })))
}

/// `PUT /inventory/{id}`
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ItemRequest>,
) -> Result<Json<Value>, ApiError> {
    validate_item_request(&req)?;
    let price = parse_money("price", req.price)?;

    let repo = state.db.inventory();
    let mut item = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;

    item.item_code = req.item_code.trim().to_string();
    item.name = req.name.trim().to_string();
    item.description = req.description.trim().to_string();
    item.price_cents = price.cents();
    item.quantity = req.quantity;

    repo.update(&item).await?;

    info!(item_id = %item.id, "Inventory item updated");

    Ok(Json(json!({
        "success": true,
        "message": "Item updated successfully",
        "item": ItemDto::from(item),
    })))
}

/// `DELETE /inventory/{id}`
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match state.db.inventory().delete(&id).await {
        Ok(()) => {}
        Err(vendo_db::DbError::NotFound { .. }) => {
            return Err(ApiError::not_found("Item not found"))
        }
        Err(e) => return Err(e.into()),
    }

    info!(item_id = %id, "Inventory item deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Item deleted successfully",
    })))
}
