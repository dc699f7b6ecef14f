use async_trait::async_trait;
use sqlx::PgPool;

use super::db_error;
use super::db_types::{decode_all, DayPassRow};
use crate::application::ports::{DayPassRepository, StoreResult};
use crate::domain::{DayPass, PassCode};

const DAY_PASS_COLUMNS: &str =
    "id, name, email, contact, purpose, visit_date, pass_code, status, created_at";

pub struct PostgresDayPassRepository {
    pool: PgPool,
}

impl PostgresDayPassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DayPassRepository for PostgresDayPassRepository {
    async fn save(&self, pass: &DayPass) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO day_passes (id, name, email, contact, purpose, visit_date, pass_code, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(*pass.id.as_uuid())
        .bind(pass.name.as_str())
        .bind(pass.email.as_str())
        .bind(pass.contact.as_str())
        .bind(&pass.purpose)
        .bind(pass.visit_date)
        .bind(pass.pass_code.as_str())
        .bind(pass.status.as_db_str())
        .bind(pass.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, "pass code"))?;
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<DayPass>> {
        let rows: Vec<DayPassRow> = sqlx::query_as(&format!(
            "SELECT {DAY_PASS_COLUMNS} FROM day_passes ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(e, "day pass"))?;
        decode_all(rows)
    }

    async fn find_by_code(&self, code: &PassCode) -> StoreResult<Option<DayPass>> {
        let row: Option<DayPassRow> = sqlx::query_as(&format!(
            "SELECT {DAY_PASS_COLUMNS} FROM day_passes WHERE pass_code = $1"
        ))
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(e, "day pass"))?;
        row.map(DayPass::try_from).transpose()
    }

    async fn mark_used(&self, code: &PassCode) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE day_passes SET status = 'Used' WHERE pass_code = $1 AND status = 'Pending'",
        )
        .bind(code.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, "day pass"))?;
        Ok(result.rows_affected() > 0)
    }
}
