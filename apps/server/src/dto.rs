//! # Wire DTOs
//!
//! Request and response shapes for the REST API.
//!
//! ## Boundary Conversion Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      JSON ◄──► Domain                                   │
//! │                                                                         │
//! │  Incoming decimals (price, discountValue, totalPaid)                    │
//! │       │  round HALF-UP to cents / basis points, exactly once            │
//! │       ▼                                                                 │
//! │  Domain: integer cents everywhere (vendo_core::Money)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Outgoing amounts: cents / 100.0 → at most 2 decimal places             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names are camelCase on the wire, snake_case in Rust.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendo_core::pricing::Discount;
use vendo_core::validation::{parse_money, parse_percentage};
use vendo_core::{
    CartLine, DiscountType, InventoryItem, Invoice, InvoiceLine, Money, ValidationError,
};
use vendo_db::NewInvoice;

/// Converts exact cents to a wire decimal (at most 2 decimal places).
fn cents_to_decimal(cents: i64) -> f64 {
    cents as f64 / 100.0
}

// =============================================================================
// Inventory
// =============================================================================

/// An inventory item as rendered on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: String,
    pub item_code: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl From<InventoryItem> for ItemDto {
    fn from(item: InventoryItem) -> Self {
        ItemDto {
            id: item.id,
            item_code: item.item_code,
            name: item.name,
            description: item.description,
            price: cents_to_decimal(item.price_cents),
            quantity: item.quantity,
            created_at: item.created_at,
        }
    }
}

/// Payload for creating or replacing an inventory item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub item_code: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

// =============================================================================
// Bills
// =============================================================================

/// One cart line from the client. Name and price are deliberately absent:
/// they are snapshot-copied from inventory server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRequest {
    pub item_id: String,
    pub quantity: i64,
}

/// Payload for creating a bill.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_mobile: Option<String>,
    pub items: Vec<CartLineRequest>,
    /// "none" (default) | "percentage" | "fixed"
    #[serde(default)]
    pub discount_type: Option<String>,
    /// Percent (e.g. 12.5) or fixed amount, per `discount_type`
    #[serde(default)]
    pub discount_value: Option<f64>,
    #[serde(default)]
    pub total_paid: Option<f64>,
}

impl CreateBillRequest {
    /// Converts the wire payload into a billing engine request,
    /// performing all decimal → exact-unit conversions.
    pub fn into_new_invoice(self) -> Result<NewInvoice, ValidationError> {
        let discount = match self.discount_type.as_deref() {
            None | Some("none") => Discount::None,
            Some("percentage") => {
                let pct = parse_percentage("discountValue", self.discount_value.unwrap_or(0.0))?;
                Discount::Percentage(pct)
            }
            Some("fixed") => {
                let amount = parse_money("discountValue", self.discount_value.unwrap_or(0.0))?;
                Discount::Fixed(amount)
            }
            Some(other) => {
                return Err(ValidationError::InvalidFormat {
                    field: "discountType".to_string(),
                    reason: format!("unknown discount type '{other}'"),
                })
            }
        };

        let total_paid = match self.total_paid {
            Some(paid) => parse_money("totalPaid", paid)?,
            None => Money::zero(),
        };

        // Empty customer fields are treated as absent
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        Ok(NewInvoice {
            customer_name: non_empty(self.customer_name),
            customer_mobile: non_empty(self.customer_mobile),
            lines: self
                .items
                .into_iter()
                .map(|line| CartLine {
                    item_id: line.item_id,
                    quantity: line.quantity,
                })
                .collect(),
            discount,
            total_paid,
        })
    }
}

/// One line of a bill on the wire, from the stored snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineDto {
    pub item_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl From<InvoiceLine> for BillLineDto {
    fn from(line: InvoiceLine) -> Self {
        BillLineDto {
            item_id: line.item_id,
            name: line.name_snapshot,
            price: cents_to_decimal(line.unit_price_cents),
            quantity: line.quantity,
        }
    }
}

/// A bill as rendered on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDto {
    pub id: String,
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    pub items: Vec<BillLineDto>,
    pub subtotal: f64,
    pub discount_type: DiscountType,
    /// Percent for percentage discounts, amount for fixed, 0 for none
    pub discount_value: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub total_paid: f64,
    pub due_amount: f64,
    pub date: DateTime<Utc>,
}

impl From<(Invoice, Vec<InvoiceLine>)> for BillDto {
    fn from((invoice, lines): (Invoice, Vec<InvoiceLine>)) -> Self {
        // discount_value is stored in basis points for percentage discounts
        // and cents for fixed ones; both divide by 100 for the wire
        let discount_value = invoice.discount_value as f64 / 100.0;

        BillDto {
            id: invoice.id,
            customer_name: invoice.customer_name,
            customer_mobile: invoice.customer_mobile,
            items: lines.into_iter().map(BillLineDto::from).collect(),
            subtotal: cents_to_decimal(invoice.subtotal_cents),
            discount_type: invoice.discount_type,
            discount_value,
            discount_amount: cents_to_decimal(invoice.discount_amount_cents),
            total_amount: cents_to_decimal(invoice.total_amount_cents),
            total_paid: cents_to_decimal(invoice.total_paid_cents),
            due_amount: cents_to_decimal(invoice.due_amount_cents),
            date: invoice.created_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bill_request(items: Vec<CartLineRequest>) -> CreateBillRequest {
        CreateBillRequest {
            customer_name: None,
            customer_mobile: None,
            items,
            discount_type: None,
            discount_value: None,
            total_paid: None,
        }
    }

    #[test]
    fn test_cents_to_decimal() {
        assert_eq!(cents_to_decimal(1099), 10.99);
        assert_eq!(cents_to_decimal(0), 0.0);
        assert_eq!(cents_to_decimal(100_000), 1000.0);
    }

    #[test]
    fn test_percentage_discount_conversion() {
        let mut req = bill_request(vec![]);
        req.discount_type = Some("percentage".to_string());
        req.discount_value = Some(12.5);

        let new_invoice = req.into_new_invoice().unwrap();
        assert_eq!(new_invoice.discount, Discount::Percentage(1250));
    }

    #[test]
    fn test_fixed_discount_conversion() {
        let mut req = bill_request(vec![]);
        req.discount_type = Some("fixed".to_string());
        req.discount_value = Some(50.0);

        let new_invoice = req.into_new_invoice().unwrap();
        assert_eq!(new_invoice.discount, Discount::Fixed(Money::from_cents(5000)));
    }

    #[test]
    fn test_unknown_discount_type_rejected() {
        let mut req = bill_request(vec![]);
        req.discount_type = Some("loyalty".to_string());

        assert!(req.into_new_invoice().is_err());
    }

    #[test]
    fn test_missing_paid_defaults_to_zero() {
        let req = bill_request(vec![CartLineRequest {
            item_id: "i-1".to_string(),
            quantity: 1,
        }]);

        let new_invoice = req.into_new_invoice().unwrap();
        assert!(new_invoice.total_paid.is_zero());
    }

    #[test]
    fn test_blank_customer_fields_become_absent() {
        let mut req = bill_request(vec![]);
        req.customer_name = Some("   ".to_string());
        req.customer_mobile = Some(String::new());

        let new_invoice = req.into_new_invoice().unwrap();
        assert!(new_invoice.customer_name.is_none());
        assert!(new_invoice.customer_mobile.is_none());
    }
}
