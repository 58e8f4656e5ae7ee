//! # Billing Engine
//!
//! Turns a cart into a persisted invoice, atomically.
//!
//! ## Two-Phase Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Invoice Creation Pipeline                           │
//! │                                                                         │
//! │  Phase 1: VALIDATE (no mutations)                                       │
//! │  ├── cart shape: non-empty, ≤ 100 lines, quantities in 1..=999          │
//! │  ├── customer mobile format (when provided)                             │
//! │  ├── resolve every item_id against inventory                            │
//! │  ├── stock check per DISTINCT item (duplicate lines aggregate)          │
//! │  └── price: subtotal → discount (clamped) → total → paid → due          │
//! │       │                                                                 │
//! │       │  any failure → error, nothing written                           │
//! │       ▼                                                                 │
//! │  Phase 2: COMMIT (one SQLite transaction)                               │
//! │  ├── guarded decrement per distinct item:                               │
//! │  │     UPDATE ... SET quantity = quantity - ?                           │
//! │  │     WHERE id = ? AND quantity >= ?                                   │
//! │  ├── insert invoice header                                              │
//! │  ├── insert one line snapshot per cart line                             │
//! │  └── COMMIT                                                             │
//! │                                                                         │
//! │  Guard refused (concurrent sale won the race)? → ROLLBACK,              │
//! │  stock and invoice history untouched, precise error returned.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The phase-1 stock check gives friendly errors in the common case; the
//! phase-2 guard is what actually prevents overselling under concurrency.

use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use vendo_core::pricing::{price_invoice, Discount, PricedLine};
use vendo_core::validation::{validate_mobile, validate_quantity};
use vendo_core::{
    CartLine, CoreError, DiscountType, Invoice, InvoiceLine, InventoryItem, Money,
    ValidationError, MAX_CART_LINES,
};

use crate::error::DbError;
use crate::pool::Database;
use crate::repository::inventory::InventoryRepository;
use crate::repository::invoice::InvoiceRepository;

// =============================================================================
// Errors
// =============================================================================

/// Errors from invoice creation.
///
/// Domain failures (bad cart, missing item, not enough stock, bad payment)
/// surface as [`BillingError::Core`]; storage failures as
/// [`BillingError::Db`].
#[derive(Debug, Error)]
pub enum BillingError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for BillingError {
    fn from(err: ValidationError) -> Self {
        BillingError::Core(CoreError::Validation(err))
    }
}

// =============================================================================
// Request
// =============================================================================

/// A bill request, already converted to exact units at the API boundary.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    pub lines: Vec<CartLine>,
    pub discount: Discount,
    pub total_paid: Money,
}

// =============================================================================
// Engine
// =============================================================================

/// The billing engine: validates a cart against inventory and commits the
/// resulting invoice and stock decrements as one transaction.
#[derive(Debug, Clone)]
pub struct BillingEngine {
    db: Database,
}

impl BillingEngine {
    /// Creates a billing engine over the given database handle.
    pub fn new(db: Database) -> Self {
        BillingEngine { db }
    }

    /// Creates an invoice from a cart.
    ///
    /// Validates everything before touching stock, then commits the stock
    /// decrements plus the invoice insert in a single transaction. On any
    /// error the inventory is exactly as it was before the call.
    ///
    /// ## Errors
    /// - [`CoreError::Validation`] for a malformed cart or customer data
    /// - [`CoreError::ItemNotFound`] when a line references an unknown item
    /// - [`CoreError::InsufficientStock`] when stock can't cover a line
    ///   (duplicate lines for the same item are counted together)
    /// - [`CoreError::InvalidPayment`] when paid is negative or exceeds total
    /// - [`DbError`] for storage failures
    pub async fn create_invoice(
        &self,
        request: NewInvoice,
    ) -> Result<(Invoice, Vec<InvoiceLine>), BillingError> {
        // ---- Phase 1: validate, no mutations ---------------------------------

        if request.lines.is_empty() {
            return Err(ValidationError::Required {
                field: "items".to_string(),
            }
            .into());
        }

        if request.lines.len() > MAX_CART_LINES {
            return Err(ValidationError::OutOfRange {
                field: "items".to_string(),
                min: 1,
                max: MAX_CART_LINES as i64,
            }
            .into());
        }

        if let Some(mobile) = &request.customer_mobile {
            validate_mobile(mobile)?;
        }

        for line in &request.lines {
            validate_quantity(line.quantity)?;
        }

        let inventory = self.db.inventory();

        // Resolve each distinct item once and aggregate requested quantities,
        // so two lines of the same item can't sneak past the stock check.
        let mut items: HashMap<String, InventoryItem> = HashMap::new();
        let mut requested: Vec<(String, i64)> = Vec::new();

        for line in &request.lines {
            match requested.iter_mut().find(|(id, _)| id == &line.item_id) {
                Some((_, qty)) => *qty += line.quantity,
                None => {
                    let item = inventory
                        .get_by_id(&line.item_id)
                        .await?
                        .ok_or_else(|| CoreError::ItemNotFound(line.item_id.clone()))?;
                    items.insert(line.item_id.clone(), item);
                    requested.push((line.item_id.clone(), line.quantity));
                }
            }
        }

        for (item_id, qty) in &requested {
            let item = &items[item_id];
            if !item.can_sell(*qty) {
                return Err(CoreError::InsufficientStock {
                    name: item.name.clone(),
                    available: item.quantity,
                    requested: *qty,
                }
                .into());
            }
        }

        let priced: Vec<PricedLine> = request
            .lines
            .iter()
            .map(|line| PricedLine::new(items[&line.item_id].price(), line.quantity))
            .collect();

        let totals = price_invoice(&priced, request.discount, request.total_paid)
            .map_err(BillingError::Core)?;

        // ---- Phase 2: commit, one transaction --------------------------------

        let now = Utc::now();
        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            customer_name: request.customer_name,
            customer_mobile: request.customer_mobile,
            subtotal_cents: totals.subtotal.cents(),
            discount_type: match request.discount {
                Discount::None => DiscountType::None,
                Discount::Percentage(_) => DiscountType::Percentage,
                Discount::Fixed(_) => DiscountType::Fixed,
            },
            discount_value: totals.discount_value,
            discount_amount_cents: totals.discount_amount.cents(),
            total_amount_cents: totals.total.cents(),
            total_paid_cents: totals.paid.cents(),
            due_amount_cents: totals.due.cents(),
            created_at: now,
        };

        let lines: Vec<InvoiceLine> = request
            .lines
            .iter()
            .map(|line| {
                let item = &items[&line.item_id];
                InvoiceLine {
                    id: Uuid::new_v4().to_string(),
                    invoice_id: invoice.id.clone(),
                    item_id: item.id.clone(),
                    name_snapshot: item.name.clone(),
                    unit_price_cents: item.price_cents,
                    quantity: line.quantity,
                    line_total_cents: item.price().multiply_quantity(line.quantity).cents(),
                    created_at: now,
                }
            })
            .collect();

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        for (item_id, qty) in &requested {
            let reserved = InventoryRepository::reserve_stock(&mut tx, item_id, *qty).await?;
            if !reserved {
                // A concurrent sale won the race between phase 1 and here.
                let available = InventoryRepository::stock_level(&mut tx, item_id).await?;
                tx.rollback().await.map_err(DbError::from)?;

                warn!(item_id = %item_id, "Stock reservation refused, rolled back");

                return Err(match available {
                    Some(available) => CoreError::InsufficientStock {
                        name: items[item_id].name.clone(),
                        available,
                        requested: *qty,
                    }
                    .into(),
                    None => CoreError::ItemNotFound(item_id.clone()).into(),
                });
            }
        }

        InvoiceRepository::insert_invoice(&mut tx, &invoice).await?;
        for line in &lines {
            InvoiceRepository::insert_line(&mut tx, line).await?;
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(
            invoice_id = %invoice.id,
            total_cents = invoice.total_amount_cents,
            lines = lines.len(),
            "Invoice created"
        );

        Ok((invoice, lines))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
