use async_trait::async_trait;
use sqlx::PgPool;

use super::db_error;
use super::db_types::{decode_all, to_u64, ContactRow, QuoteRow, VisitRow};
use crate::application::ports::{InquiryRepository, StoreResult};
use crate::domain::{ContactRequest, InquiryStatus, QuoteRequest, VisitRequest};

pub struct PostgresInquiryRepository {
    pool: PgPool,
}

impl PostgresInquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InquiryRepository for PostgresInquiryRepository {
    async fn save_quote(&self, quote: &QuoteRequest) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO quote_requests (id, full_name, work_email, contact_number, firm_name,
                 firm_type, required_workspace, capacity, start_date, duration,
                 additional_requirements, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(*quote.id.as_uuid())
        .bind(quote.full_name.as_str())
        .bind(quote.work_email.as_str())
        .bind(quote.contact_number.as_str())
        .bind(&quote.firm_name)
        .bind(&quote.firm_type)
        .bind(&quote.required_workspace)
        .bind(i32::try_from(quote.capacity).unwrap_or(i32::MAX))
        .bind(quote.start_date)
        .bind(&quote.duration)
        .bind(&quote.additional_requirements)
        .bind(quote.status.as_db_str())
        .bind(quote.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, "quote request"))?;
        Ok(())
    }

    async fn list_quotes(&self) -> StoreResult<Vec<QuoteRequest>> {
        let rows: Vec<QuoteRow> = sqlx::query_as(
            "SELECT id, full_name, work_email, contact_number, firm_name, firm_type,
                    required_workspace, capacity, start_date, duration, additional_requirements,
                    status, created_at
             FROM quote_requests
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(e, "quote request"))?;
        decode_all(rows)
    }

    async fn count_quotes(&self, status: InquiryStatus) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quote_requests WHERE status = $1")
            .bind(status.as_db_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(e, "quote request"))?;
        Ok(to_u64(count))
    }

    async fn save_contact(&self, contact: &ContactRequest) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO contact_requests (id, name, email, phone, subject, message, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(*contact.id.as_uuid())
        .bind(contact.name.as_str())
        .bind(contact.email.as_str())
        .bind(&contact.phone)
        .bind(&contact.subject)
        .bind(&contact.message)
        .bind(contact.status.as_db_str())
        .bind(contact.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, "contact request"))?;
        Ok(())
    }

    async fn list_contacts(&self) -> StoreResult<Vec<ContactRequest>> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            "SELECT id, name, email, phone, subject, message, status, created_at
             FROM contact_requests
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(e, "contact request"))?;
        decode_all(rows)
    }

    async fn save_visit(&self, visit: &VisitRequest) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO visit_requests (id, workspace_id, workspace_name, full_name, email,
                 contact_number, visit_date, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(*visit.id.as_uuid())
        .bind(*visit.workspace_id.as_uuid())
        .bind(&visit.workspace_name)
        .bind(visit.full_name.as_str())
        .bind(visit.email.as_str())
        .bind(visit.contact_number.as_str())
        .bind(visit.visit_date)
        .bind(visit.status.as_db_str())
        .bind(visit.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, "visit request"))?;
        Ok(())
    }

    async fn list_visits(&self) -> StoreResult<Vec<VisitRequest>> {
        let rows: Vec<VisitRow> = sqlx::query_as(
            "SELECT id, workspace_id, workspace_name, full_name, email, contact_number,
                    visit_date, status, created_at
             FROM visit_requests
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(e, "visit request"))?;
        decode_all(rows)
    }
}
