use async_trait::async_trait;
use sqlx::PgPool;

use super::booking_repository::scope_email;
use super::db_error;
use super::db_types::{decode_all, to_i64, to_u64, InvoiceRow};
use crate::application::access::RecordScope;
use crate::application::ports::{InvoiceRepository, StoreResult};
use crate::domain::{BookingId, Invoice, InvoiceId, InvoiceNumber, InvoiceStatus};

const INVOICE_COLUMNS: &str = "id, invoice_number, booking_id, user_id, customer_name, \
     customer_email, workspace_name, amount, payment_method, status, due_date, paid_date, created_at";

pub struct PostgresInvoiceRepository {
    pool: PgPool,
}

impl PostgresInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    async fn save(&self, invoice: &Invoice) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO invoices (id, invoice_number, booking_id, user_id, customer_name,
                 customer_email, workspace_name, amount, payment_method, status, due_date, paid_date,
                 created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(*invoice.id.as_uuid())
        .bind(invoice.invoice_number.as_str())
        .bind(*invoice.booking_id.as_uuid())
        .bind(invoice.user_id.as_ref().map(|user| *user.as_uuid()))
        .bind(&invoice.customer_name)
        .bind(invoice.customer_email.as_str())
        .bind(&invoice.workspace_name)
        .bind(to_i64(invoice.amount)?)
        .bind(invoice.payment_method.as_str())
        .bind(invoice.status.as_db_str())
        .bind(invoice.due_date)
        .bind(invoice.paid_date)
        .bind(invoice.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, "invoice number"))?;
        Ok(())
    }

    async fn find_by_number(&self, number: &InvoiceNumber) -> StoreResult<Option<Invoice>> {
        let row: Option<InvoiceRow> = sqlx::query_as(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE invoice_number = $1"
        ))
        .bind(number.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(e, "invoice"))?;
        row.map(Invoice::try_from).transpose()
    }

    async fn find_by_booking(&self, booking_id: &BookingId) -> StoreResult<Option<Invoice>> {
        let row: Option<InvoiceRow> = sqlx::query_as(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE booking_id = $1"
        ))
        .bind(*booking_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(e, "invoice"))?;
        row.map(Invoice::try_from).transpose()
    }

    async fn list(&self, scope: &RecordScope) -> StoreResult<Vec<Invoice>> {
        let rows: Vec<InvoiceRow> = sqlx::query_as(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices
             WHERE ($1::text IS NULL OR customer_email = $1)
             ORDER BY created_at DESC"
        ))
        .bind(scope_email(scope))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(e, "invoice"))?;
        decode_all(rows)
    }

    async fn update_status(&self, id: &InvoiceId, status: InvoiceStatus) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE invoices SET status = $2 WHERE id = $1")
            .bind(*id.as_uuid())
            .bind(status.as_db_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(e, "invoice"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_status(&self, status: InvoiceStatus) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices WHERE status = $1")
            .bind(status.as_db_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(e, "invoice"))?;
        Ok(to_u64(count))
    }
}
