//! # Inventory Repository
//!
//! Database operations for inventory items.
//!
//! ## Responsibilities
//! - CRUD operations on the `inventory_items` table
//! - Code-based lookup (case-insensitive via COLLATE NOCASE)
//! - Stock adjustments that can never drive quantity negative
//!
//! ## Stock Mutation Rules
//! ```text
//! adjust_stock(delta)   - manual correction, guarded at quantity + delta >= 0
//! reserve_stock(qty)    - sale-time decrement, guarded at quantity >= qty,
//!                         runs on a transaction connection so the billing
//!                         engine can roll the whole sale back
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use vendo_core::InventoryItem;

use crate::error::{DbError, DbResult};

/// Repository for inventory item database operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new inventory repository with the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Inserts a new inventory item.
    ///
    /// ## Errors
    /// - [`DbError::UniqueViolation`] if the item code already exists
    ///   (comparison is case-insensitive)
    pub async fn insert(&self, item: &InventoryItem) -> DbResult<()> {
        debug!(id = %item.id, code = %item.item_code, "Inserting inventory item");

        let result = sqlx::query(
            r#"
            INSERT INTO inventory_items
                (id, item_code, name, description, price_cents, quantity,
                 created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.id)
        .bind(&item.item_code)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(item.quantity)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(match DbError::from(e) {
                DbError::UniqueViolation { .. } => DbError::duplicate("itemCode", &item.item_code),
                other => other,
            }),
        }
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Fetches an item by its UUID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, item_code, name, description, price_cents, quantity,
                   created_at, updated_at
            FROM inventory_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Fetches an item by its code (case-insensitive).
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, item_code, name, description, price_cents, quantity,
                   created_at, updated_at
            FROM inventory_items
            WHERE item_code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists all inventory items, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, item_code, name, description, price_cents, quantity,
                   created_at, updated_at
            FROM inventory_items
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts all inventory items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Updates an existing item's code, name, description, price and quantity.
    ///
    /// Touches `updated_at`. The caller supplies the full desired state;
    /// partial updates are assembled in the handler layer.
    ///
    /// ## Errors
    /// - [`DbError::NotFound`] if no item with this ID exists
    /// - [`DbError::UniqueViolation`] if the new code collides with another item
    pub async fn update(&self, item: &InventoryItem) -> DbResult<()> {
        debug!(id = %item.id, "Updating inventory item");

        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET item_code = ?2,
                name = ?3,
                description = ?4,
                price_cents = ?5,
                quantity = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.item_code)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(item.quantity)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        let result = match result {
            Ok(r) => r,
            Err(e) => {
                return Err(match DbError::from(e) {
                    DbError::UniqueViolation { .. } => {
                        DbError::duplicate("itemCode", &item.item_code)
                    }
                    other => other,
                })
            }
        };

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", &item.id));
        }

        Ok(())
    }

    /// Adjusts stock by a delta (positive = restock, negative = correction).
    ///
    /// The guard clause refuses adjustments that would drive quantity
    /// negative, matching the CHECK constraint on the table.
    ///
    /// ## Errors
    /// - [`DbError::NotFound`] if the item doesn't exist or the adjustment
    ///   would make quantity negative
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = delta, "Adjusting stock");

        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET quantity = quantity + ?2,
                updated_at = ?3
            WHERE id = ?1 AND quantity + ?2 >= 0
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Deletes an item by ID.
    ///
    /// Historical invoice lines keep their snapshots; deleting an item
    /// never rewrites past sales.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting inventory item");

        let result = sqlx::query("DELETE FROM inventory_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    // =========================================================================
    // Transaction-scoped operations (used by the billing engine)
    // =========================================================================

    /// Attempts to reserve `qty` units of an item on a transaction connection.
    ///
    /// The decrement only happens when enough stock is available; the guard
    /// and the decrement are a single statement, so concurrent sales cannot
    /// both take the last unit.
    ///
    /// ## Returns
    /// `true` if the stock was reserved, `false` if the guard refused
    /// (item missing or not enough stock). The caller decides whether to
    /// roll back.
    pub async fn reserve_stock(
        conn: &mut SqliteConnection,
        id: &str,
        qty: i64,
    ) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET quantity = quantity - ?2,
                updated_at = ?3
            WHERE id = ?1 AND quantity >= ?2
            "#,
        )
        .bind(id)
        .bind(qty)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Reads the current stock level of an item on a transaction connection.
    ///
    /// Used to produce a precise error message after a failed reservation:
    /// `None` means the item doesn't exist at all.
    pub async fn stock_level(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<i64>> {
        let level: Option<i64> =
            sqlx::query_scalar("SELECT quantity FROM inventory_items WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(level)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
