//! # Repository Module
//!
//! Database repository implementations for Vendo POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.   │
//! │                                                                         │
//! │  HTTP handler / billing engine                                          │
//! │       │                                                                 │
//! │       │  db.inventory().get_by_id(id)                                   │
//! │       ▼                                                                 │
//! │  InventoryRepository                                                    │
//! │  ├── insert / update / delete                                           │
//! │  ├── get_by_id / get_by_code / list                                     │
//! │  └── reserve_stock (guarded decrement, transaction-scoped)              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`inventory::InventoryRepository`] - Item CRUD and stock adjustments
//! - [`invoice::InvoiceRepository`] - Invoice reads and transactional inserts

pub mod inventory;
pub mod invoice;
