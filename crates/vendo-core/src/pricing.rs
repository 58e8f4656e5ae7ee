//! # Invoice Pricing
//!
//! The pure half of the billing engine: turns priced lines plus a discount
//! and a tendered amount into invoice totals.
//!
//! ## The Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Invoice Pricing Pipeline                            │
//! │                                                                         │
//! │  lines [(unit_price, qty), ...]                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal = Σ unit_price × qty                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  discount_amount                                                        │
//! │       ├── None        → 0                                               │
//! │       ├── Percentage  → subtotal × clamp(bps, 0..=10000) / 10000        │
//! │       └── Fixed       → min(amount, subtotal)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = subtotal - discount_amount      (>= 0 by the clamps)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  paid outside [0, total]? → InvalidPayment                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  due = total - paid                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This function is deterministic: the same lines, discount, and paid amount
//! always produce the same totals, regardless of stock state.
//!
//! ## Clamp, Don't Reject
//! Out-of-range discounts (percentage > 100, fixed > subtotal) are clamped
//! to their maximum instead of failing the request. One policy, applied on
//! every path.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Maximum percentage discount in basis points (100%).
pub const MAX_DISCOUNT_BPS: u32 = 10_000;

// =============================================================================
// Inputs
// =============================================================================

/// A cart line resolved against inventory: frozen unit price plus quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub unit_price: Money,
    pub quantity: i64,
}

impl PricedLine {
    /// Creates a priced line.
    pub const fn new(unit_price: Money, quantity: i64) -> Self {
        PricedLine {
            unit_price,
            quantity,
        }
    }

    /// Line total: `unit_price * quantity`.
    #[inline]
    pub const fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The discount requested on an invoice, already converted to exact units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    /// No discount.
    None,
    /// Percentage of the subtotal, in basis points (1250 = 12.5%).
    /// Values above 10000 are clamped to 10000.
    Percentage(u32),
    /// Fixed amount. Values above the subtotal are clamped to the subtotal.
    Fixed(Money),
}

// =============================================================================
// Outputs
// =============================================================================

/// Computed invoice totals, all in exact cents.
///
/// `discount_value` is the effective (post-clamp) discount input: basis
/// points for percentage, cents for fixed, 0 for none. It is what gets
/// persisted and echoed back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub discount_value: i64,
    pub discount_amount: Money,
    pub total: Money,
    pub paid: Money,
    pub due: Money,
}

// =============================================================================
// Pricing
// =============================================================================

/// Computes invoice totals from resolved lines, a discount, and the amount
/// tendered.
///
/// ## Errors
/// - [`CoreError::InvalidPayment`] if `paid` is negative or exceeds the
///   discounted total.
///
/// Stock is not consulted here; availability checks belong to the billing
/// engine's commit phase.
///
/// ## Example
/// ```rust
/// use vendo_core::money::Money;
/// use vendo_core::pricing::{price_invoice, Discount, PricedLine};
///
/// // 2 × 100.00, no discount, paid in full
/// let lines = [PricedLine::new(Money::from_cents(10_000), 2)];
/// let totals = price_invoice(&lines, Discount::None, Money::from_cents(20_000)).unwrap();
///
/// assert_eq!(totals.subtotal.cents(), 20_000);
/// assert_eq!(totals.total.cents(), 20_000);
/// assert_eq!(totals.due.cents(), 0);
/// ```
pub fn price_invoice(
    lines: &[PricedLine],
    discount: Discount,
    paid: Money,
) -> CoreResult<InvoiceTotals> {
    let mut subtotal = Money::zero();
    for line in lines {
        subtotal += line.line_total();
    }

    let (discount_value, discount_amount) = match discount {
        Discount::None => (0, Money::zero()),
        Discount::Percentage(bps) => {
            let clamped = bps.min(MAX_DISCOUNT_BPS);
            (clamped as i64, subtotal.percentage_of(clamped))
        }
        Discount::Fixed(amount) => {
            let clamped = amount.min(subtotal);
            (clamped.cents(), clamped)
        }
    };

    // Both clamps guarantee discount_amount <= subtotal, so total >= 0.
    let total = subtotal - discount_amount;

    if paid.is_negative() {
        return Err(CoreError::InvalidPayment {
            reason: "paid amount must not be negative".to_string(),
        });
    }
    if paid > total {
        return Err(CoreError::InvalidPayment {
            reason: format!("paid amount {} exceeds total {}", paid, total),
        });
    }

    Ok(InvoiceTotals {
        subtotal,
        discount_value,
        discount_amount,
        total,
        paid,
        due: total - paid,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
