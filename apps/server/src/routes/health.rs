//! Health check endpoint for liveness probes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use vendo_db::migrations::migration_status;

use crate::error::ApiError;
use crate::AppState;

/// `GET /health`
///
/// Liveness plus a few cheap diagnostics: item count and how many
/// migrations have been applied.
pub async fn health(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let items = state.db.inventory().count().await?;
    let (total, applied) = migration_status(state.db.pool()).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "vendo-server",
            "version": env!("CARGO_PKG_VERSION"),
            "items": items,
            "migrations": { "applied": applied, "total": total },
        })),
    ))
}
