use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use super::db_types::{decode_all, payment_status_str, to_i64, BookingRow};
use crate::application::access::RecordScope;
use crate::application::ports::{BookingRepository, StoreResult};
use crate::domain::{BookingId, BookingRequest, BookingStatus};

const BOOKING_COLUMNS: &str = "id, workspace_id, workspace_name, full_name, email, contact_number, \
     firm_name, duration, start_date, lease_start, lease_end, total_amount, payment_method, \
     payment_status, status, invoice_number, occupant, created_at, updated_at";

pub(super) fn scope_email(scope: &RecordScope) -> Option<&str> {
    match scope {
        RecordScope::All => None,
        RecordScope::Own(email) => Some(email.as_str()),
    }
}

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn save(&self, booking: &BookingRequest) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO bookings (id, workspace_id, workspace_name, full_name, email, contact_number,
                 firm_name, duration, start_date, lease_start, lease_end, total_amount, payment_method,
                 payment_status, status, invoice_number, occupant, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)",
        )
        .bind(*booking.id.as_uuid())
        .bind(*booking.workspace_id.as_uuid())
        .bind(&booking.workspace_name)
        .bind(booking.full_name.as_str())
        .bind(booking.email.as_str())
        .bind(booking.contact_number.as_str())
        .bind(&booking.firm_name)
        .bind(&booking.duration)
        .bind(booking.start_date)
        .bind(booking.lease.start)
        .bind(booking.lease.end)
        .bind(to_i64(booking.total_amount)?)
        .bind(booking.payment_method.as_str())
        .bind(payment_status_str(booking.payment_status))
        .bind(booking.status.as_str())
        .bind(booking.invoice_number.as_str())
        .bind(booking.occupant.as_ref().map(|user| *user.as_uuid()))
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, "booking"))?;
        Ok(())
    }

    async fn delete(&self, id: &BookingId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(e, "booking"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: &BookingId) -> StoreResult<Option<BookingRequest>> {
        let row: Option<BookingRow> =
            sqlx::query_as(&format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"))
                .bind(*id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error(e, "booking"))?;
        row.map(BookingRequest::try_from).transpose()
    }

    async fn find_many(&self, ids: &[BookingId]) -> StoreResult<Vec<BookingRequest>> {
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<BookingRow> =
            sqlx::query_as(&format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ANY($1)"))
                .bind(&ids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error(e, "booking"))?;
        decode_all(rows)
    }

    async fn list(&self, scope: &RecordScope) -> StoreResult<Vec<BookingRequest>> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE ($1::text IS NULL OR email = $1)
             ORDER BY created_at DESC"
        ))
        .bind(scope_email(scope))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(e, "booking"))?;
        decode_all(rows)
    }

    async fn update_status(
        &self,
        id: &BookingId,
        expected: BookingStatus,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE bookings SET status = $3, updated_at = $4 WHERE id = $1 AND status = $2",
        )
        .bind(*id.as_uuid())
        .bind(expected.as_str())
        .bind(next.as_str())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, "booking"))?;
        Ok(result.rows_affected() > 0)
    }
}
