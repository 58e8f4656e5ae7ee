//! # vendo-db: Database Layer for Vendo POS
//!
//! This crate provides database access for the Vendo POS system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vendo POS Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /bills)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     vendo-db (THIS CRATE)                       │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌──────────────┐    │    │
//! │  │   │   Database    │   │  Repositories  │   │BillingEngine │    │    │
//! │  │   │   (pool.rs)   │   │ inventory.rs   │   │ (billing.rs) │    │    │
//! │  │   │               │◄──│ invoice.rs     │◄──│ validate all │    │    │
//! │  │   │ SqlitePool    │   │                │   │ then commit  │    │    │
//! │  │   └───────────────┘   └────────────────┘   └──────────────┘    │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │                       SQLite Database (WAL)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (inventory, invoice)
//! - [`billing`] - The billing engine: invoice creation as one transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vendo_db::{BillingEngine, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/vendo.db")).await?;
//!
//! let engine = BillingEngine::new(db.clone());
//! let (invoice, lines) = engine.create_invoice(request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use billing::{BillingEngine, BillingError, NewInvoice};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::inventory::InventoryRepository;
pub use repository::invoice::InvoiceRepository;
