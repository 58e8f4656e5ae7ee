//! # Domain Types
//!
//! Core domain types used throughout Vendo POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │ InventoryItem   │   │     Invoice     │   │  InvoiceLine    │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  invoice_id(FK) │        │
//! │  │  item_code      │   │  customer info  │   │  item_id        │        │
//! │  │  price_cents    │   │  totals (cents) │   │  name_snapshot  │        │
//! │  │  quantity       │   │  discount       │   │  unit price     │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  DiscountType   │   │    CartLine     │  (request-scoped,            │
//! │  │  ─────────────  │   │  ─────────────  │   never persisted)           │
//! │  │  None           │   │  item_id        │                              │
//! │  │  Percentage     │   │  quantity       │                              │
//! │  │  Fixed          │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Inventory items have:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `item_code`: short business code, human-readable, case-insensitively unique

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Inventory Item
// =============================================================================

/// An item tracked in inventory and available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Short business code (1-5 alphanumeric characters).
    /// Unique across all items regardless of letter case.
    pub item_code: String,

    /// Display name shown on the bill.
    pub name: String,

    /// Item description.
    pub description: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Available stock. Never negative.
    pub quantity: i64,

    /// When the item was added.
    pub created_at: DateTime<Utc>,

    /// When the item was last edited (directly or by a sale).
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Creates a new item with a fresh UUID and current timestamps.
    pub fn new(
        item_code: String,
        name: String,
        description: Option<String>,
        price: Money,
        quantity: i64,
    ) -> Self {
        let now = Utc::now();
        InventoryItem {
            id: uuid::Uuid::new_v4().to_string(),
            item_code,
            name,
            description: description.unwrap_or_default(),
            price_cents: price.cents(),
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the requested quantity is in stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }
}

// =============================================================================
// Discount Type
// =============================================================================

/// How the discount on an invoice is expressed.
///
/// The companion `discount_value` field on [`Invoice`] is interpreted per
/// variant: basis points for `Percentage`, cents for `Fixed`, 0 for `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// No discount applied.
    None,
    /// Percentage of the subtotal (0-100%).
    Percentage,
    /// Fixed currency amount, at most the subtotal.
    Fixed,
}

impl Default for DiscountType {
    fn default() -> Self {
        DiscountType::None
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One line of an incoming bill request.
///
/// Ephemeral and request-scoped: the billing engine resolves it against
/// inventory and persists an [`InvoiceLine`] snapshot instead. Name and
/// price are taken from inventory at that point; the server is
/// authoritative, not the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Reference to the inventory item being sold.
    pub item_id: String,
    /// Requested quantity (positive integer).
    pub quantity: i64,
}

// =============================================================================
// Invoice
// =============================================================================

/// A completed sale. Created atomically by the billing engine,
/// never updated in place, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: String,
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    /// Sum of `unit_price * quantity` over all lines.
    pub subtotal_cents: i64,
    pub discount_type: DiscountType,
    /// Basis points for percentage discounts, cents for fixed, 0 for none.
    /// Stored post-clamp, so it always satisfies the documented bounds.
    pub discount_value: i64,
    pub discount_amount_cents: i64,
    /// `max(0, subtotal - discount)`.
    pub total_amount_cents: i64,
    /// Amount tendered, within `[0, total_amount_cents]`.
    pub total_paid_cents: i64,
    pub due_amount_cents: i64,
    /// Creation timestamp. Set once, immutable.
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Returns the invoice total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }

    /// Returns the outstanding balance as Money.
    #[inline]
    pub fn due_amount(&self) -> Money {
        Money::from_cents(self.due_amount_cents)
    }
}

// =============================================================================
// Invoice Line
// =============================================================================

/// A line item on an invoice.
/// Uses the snapshot pattern to freeze item data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InvoiceLine {
    pub id: String,
    pub invoice_id: String,
    pub item_id: String,
    /// Item name at time of sale (frozen).
    pub name_snapshot: String,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// Quantity sold.
    pub quantity: i64,
    /// `unit_price * quantity`.
    pub line_total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl InvoiceLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_type_default() {
        assert_eq!(DiscountType::default(), DiscountType::None);
    }

    #[test]
    fn test_can_sell() {
        let item = InventoryItem {
            id: "i-1".to_string(),
            item_code: "A1".to_string(),
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price_cents: 10000,
            quantity: 5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(item.can_sell(5));
        assert!(!item.can_sell(6));
    }
}
