use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use super::db_types::{decode_all, to_u64, UserRow};
use crate::application::ports::{StoreResult, UserRepository};
use crate::domain::{Email, User, UserId, UserStatus};

const USER_COLUMNS: &str =
    "id, name, email, mobile, organization, role, status, joined_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO users (id, name, email, mobile, organization, role, status, joined_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(*user.id().as_uuid())
        .bind(user.name().as_str())
        .bind(user.email().as_str())
        .bind(user.mobile().map(|m| m.as_str()))
        .bind(user.organization())
        .bind(user.role().as_str())
        .bind(user.status().as_db_str())
        .bind(user.joined_at())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, "email"))?;
        Ok(())
    }

    async fn update(&self, user: &User) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE users
             SET name = $2, email = $3, mobile = $4, organization = $5, role = $6, status = $7
             WHERE id = $1",
        )
        .bind(*user.id().as_uuid())
        .bind(user.name().as_str())
        .bind(user.email().as_str())
        .bind(user.mobile().map(|m| m.as_str()))
        .bind(user.organization())
        .bind(user.role().as_str())
        .bind(user.status().as_db_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, "email"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &UserId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(e, "user"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(*id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error(e, "user"))?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error(e, "user"))?;
        row.map(User::try_from).transpose()
    }

    async fn find_many(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)"))
                .bind(&ids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error(e, "user"))?;
        decode_all(rows)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let rows: Vec<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY joined_at DESC"))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error(e, "user"))?;
        decode_all(rows)
    }

    async fn count(&self, status: Option<UserStatus>) -> StoreResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE ($1::text IS NULL OR status = $1)")
                .bind(status.map(|s| s.as_db_str()))
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error(e, "user"))?;
        Ok(to_u64(count))
    }
}
