//! # Invoice Repository
//!
//! Database operations for invoices and their line snapshots.
//!
//! ## Write Path
//! Invoices are only ever written by the billing engine, inside the same
//! transaction as the stock decrements. The insert methods here therefore
//! take a `&mut SqliteConnection` rather than the pool, so they compose
//! into that transaction.
//!
//! ## Read Path
//! Reads go through the pool as usual. History is returned newest-first,
//! each invoice paired with its lines.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use vendo_core::{Invoice, InvoiceLine};

use crate::error::DbResult;

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new invoice repository with the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    // =========================================================================
    // Transaction-scoped inserts (used by the billing engine)
    // =========================================================================

    /// Inserts an invoice header on a transaction connection.
    pub async fn insert_invoice(conn: &mut SqliteConnection, invoice: &Invoice) -> DbResult<()> {
        debug!(id = %invoice.id, "Inserting invoice");

        sqlx::query(
            r#"
            INSERT INTO invoices
                (id, customer_name, customer_mobile, subtotal_cents,
                 discount_type, discount_value, discount_amount_cents,
                 total_amount_cents, total_paid_cents, due_amount_cents,
                 created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.customer_name)
        .bind(&invoice.customer_mobile)
        .bind(invoice.subtotal_cents)
        .bind(invoice.discount_type)
        .bind(invoice.discount_value)
        .bind(invoice.discount_amount_cents)
        .bind(invoice.total_amount_cents)
        .bind(invoice.total_paid_cents)
        .bind(invoice.due_amount_cents)
        .bind(invoice.created_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Inserts one invoice line snapshot on a transaction connection.
    pub async fn insert_line(conn: &mut SqliteConnection, line: &InvoiceLine) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO invoice_lines
                (id, invoice_id, item_id, name_snapshot, unit_price_cents,
                 quantity, line_total_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&line.id)
        .bind(&line.invoice_id)
        .bind(&line.item_id)
        .bind(&line.name_snapshot)
        .bind(line.unit_price_cents)
        .bind(line.quantity)
        .bind(line.line_total_cents)
        .bind(line.created_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches an invoice with its lines by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<(Invoice, Vec<InvoiceLine>)>> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, customer_name, customer_mobile, subtotal_cents,
                   discount_type, discount_value, discount_amount_cents,
                   total_amount_cents, total_paid_cents, due_amount_cents,
                   created_at
            FROM invoices
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match invoice {
            Some(invoice) => {
                let lines = self.get_lines(&invoice.id).await?;
                Ok(Some((invoice, lines)))
            }
            None => Ok(None),
        }
    }

    /// Fetches the lines of an invoice, in insertion order.
    pub async fn get_lines(&self, invoice_id: &str) -> DbResult<Vec<InvoiceLine>> {
        let lines = sqlx::query_as::<_, InvoiceLine>(
            r#"
            SELECT id, invoice_id, item_id, name_snapshot, unit_price_cents,
                   quantity, line_total_cents, created_at
            FROM invoice_lines
            WHERE invoice_id = ?1
            ORDER BY rowid ASC
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Lists all invoices with their lines, newest first.
    ///
    /// Small-shop volumes make the N+1 line fetch a non-issue here; if
    /// history ever grows past a few thousand invoices this becomes a
    /// single join with grouping.
    pub async fn list_with_lines(&self) -> DbResult<Vec<(Invoice, Vec<InvoiceLine>)>> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, customer_name, customer_mobile, subtotal_cents,
                   discount_type, discount_value, discount_amount_cents,
                   total_amount_cents, total_paid_cents, due_amount_cents,
                   created_at
            FROM invoices
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(invoices.len());
        for invoice in invoices {
            let lines = self.get_lines(&invoice.id).await?;
            result.push((invoice, lines));
        }

        Ok(result)
    }

    /// Counts all invoices.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use vendo_core::DiscountType;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_invoice() -> Invoice {
        Invoice {
            id: uuid::Uuid::new_v4().to_string(),
            customer_name: Some("Walk-in".to_string()),
            customer_mobile: None,
            subtotal_cents: 20000,
            discount_type: DiscountType::Percentage,
            discount_value: 1000, // 10% in basis points
            discount_amount_cents: 2000,
            total_amount_cents: 18000,
            total_paid_cents: 18000,
            due_amount_cents: 0,
            created_at: Utc::now(),
        }
    }

    fn sample_line(invoice_id: &str) -> InvoiceLine {
        InvoiceLine {
            id: uuid::Uuid::new_v4().to_string(),
            invoice_id: invoice_id.to_string(),
            item_id: "item-1".to_string(),
            name_snapshot: "Widget".to_string(),
            unit_price_cents: 10000,
            quantity: 2,
            line_total_cents: 20000,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_with_lines() {
        let db = test_db().await;
        let repo = db.invoices();

        let invoice = sample_invoice();
        let line = sample_line(&invoice.id);

        let mut tx = db.pool().begin().await.unwrap();
        InvoiceRepository::insert_invoice(&mut tx, &invoice)
            .await
            .unwrap();
        InvoiceRepository::insert_line(&mut tx, &line).await.unwrap();
        tx.commit().await.unwrap();

        let (fetched, lines) = repo.get_by_id(&invoice.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_amount_cents, 18000);
        assert_eq!(fetched.discount_type, DiscountType::Percentage);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name_snapshot, "Widget");
        assert_eq!(lines[0].line_total_cents, 20000);
    }

    #[tokio::test]
    async fn test_get_missing_invoice() {
        let db = test_db().await;
        let repo = db.invoices();

        assert!(repo.get_by_id("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rollback_discards_invoice() {
        let db = test_db().await;
        let repo = db.invoices();

        let invoice = sample_invoice();

        let mut tx = db.pool().begin().await.unwrap();
        InvoiceRepository::insert_invoice(&mut tx, &invoice)
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        assert!(repo.get_by_id(&invoice.id).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = test_db().await;
        let repo = db.invoices();

        let mut first = sample_invoice();
        first.created_at = Utc::now() - chrono::Duration::seconds(10);
        let second = sample_invoice();

        let mut tx = db.pool().begin().await.unwrap();
        InvoiceRepository::insert_invoice(&mut tx, &first)
            .await
            .unwrap();
        InvoiceRepository::insert_invoice(&mut tx, &second)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let listed = repo.list_with_lines().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].0.id, second.id);
        assert_eq!(listed[1].0.id, first.id);
    }
}
