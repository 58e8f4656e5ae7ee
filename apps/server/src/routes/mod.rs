//! HTTP route handlers.
//!
//! - [`bills`] - bill creation and history
//! - [`inventory`] - item CRUD
//! - [`health`] - liveness probe

pub mod bills;
pub mod health;
pub mod inventory;
