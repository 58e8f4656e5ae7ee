//! # Vendo Server
//!
//! REST API for the Vendo POS backend.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        HTTP Surface                                     │
//! │                                                                         │
//! │  POST   /bills            create a bill (atomic stock decrement)        │
//! │  GET    /bills            bill history, newest first                    │
//! │  GET    /bills/{id}       one bill with its lines                       │
//! │                                                                         │
//! │  POST   /inventory        add an item                                   │
//! │  GET    /inventory        list items                                    │
//! │  PUT    /inventory/{id}   edit an item                                  │
//! │  DELETE /inventory/{id}   remove an item                                │
//! │                                                                         │
//! │  GET    /health           liveness probe                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Success payloads carry `"success": true`; every failure renders as
//! `{ "success": false, "message": "..." }` with an appropriate status.
//!
//! The router is exposed as a library so tests can drive it in-process
//! with `tower::ServiceExt::oneshot`.

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use vendo_db::{BillingEngine, Database};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub billing: BillingEngine,
}

impl AppState {
    /// Builds the state over a database handle.
    pub fn new(db: Database) -> Self {
        AppState {
            billing: BillingEngine::new(db.clone()),
            db,
        }
    }
}

/// Builds the application router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/bills",
            post(routes::bills::create_bill).get(routes::bills::list_bills),
        )
        .route("/bills/:id", get(routes::bills::get_bill))
        .route(
            "/inventory",
            post(routes::inventory::create_item).get(routes::inventory::list_items),
        )
        .route(
            "/inventory/:id",
            put(routes::inventory::update_item).delete(routes::inventory::delete_item),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
