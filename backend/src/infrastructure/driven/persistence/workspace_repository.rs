use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::db_error;
use super::db_types::{to_u64, WorkspaceRow};
use crate::application::ports::{AllotOutcome, StoreError, StoreResult, WorkspaceRepository};
use crate::domain::{Allotment, UserId, Workspace, WorkspaceDetails, WorkspaceId};

const WORKSPACE_COLUMNS: &str = "id, name, location, floor, kind, capacity, base_price, amenities, \
     image_url, featured, has_conference_hall, has_cabin, allotted_to, allotment_start, \
     allotment_end, created_at, updated_at";

/// A refused conditional write is re-read to tell "occupied" from "missing".
/// If the holder lapsed or released in between, the write is tried again.
const ALLOT_ATTEMPTS: usize = 3;

pub struct PostgresWorkspaceRepository {
    pool: PgPool,
}

impl PostgresWorkspaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn conditional_allot(
        &self,
        id: &WorkspaceId,
        allotment: &Allotment,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Workspace>> {
        let row: Option<WorkspaceRow> = sqlx::query_as(&format!(
            "UPDATE workspaces
             SET allotted_to = $2, allotment_start = $3, allotment_end = $4, updated_at = now()
             WHERE id = $1 AND (allotted_to IS NULL OR allotment_end <= $5)
             RETURNING {WORKSPACE_COLUMNS}"
        ))
        .bind(*id.as_uuid())
        .bind(*allotment.allotted_to.as_uuid())
        .bind(allotment.window.start)
        .bind(allotment.window.end)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(e, "workspace"))?;
        Ok(row.map(Workspace::from))
    }
}

#[async_trait]
impl WorkspaceRepository for PostgresWorkspaceRepository {
    async fn save(&self, workspace: &Workspace) -> StoreResult<()> {
        let allotment = workspace.allotment.as_ref();
        sqlx::query(
            "INSERT INTO workspaces (id, name, location, floor, kind, capacity, base_price, amenities,
                 image_url, featured, has_conference_hall, has_cabin, allotted_to, allotment_start,
                 allotment_end, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)",
        )
        .bind(*workspace.id.as_uuid())
        .bind(&workspace.name)
        .bind(&workspace.location)
        .bind(&workspace.floor)
        .bind(&workspace.kind)
        .bind(&workspace.capacity)
        .bind(workspace.base_price)
        .bind(&workspace.amenities)
        .bind(&workspace.image_url)
        .bind(workspace.featured)
        .bind(workspace.features.has_conference_hall)
        .bind(workspace.features.has_cabin)
        .bind(allotment.map(|a| *a.allotted_to.as_uuid()))
        .bind(allotment.map(|a| a.window.start))
        .bind(allotment.map(|a| a.window.end))
        .bind(workspace.created_at)
        .bind(workspace.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, "workspace"))?;
        Ok(())
    }

    async fn update_details(
        &self,
        id: &WorkspaceId,
        details: &WorkspaceDetails,
    ) -> StoreResult<Option<Workspace>> {
        let row: Option<WorkspaceRow> = sqlx::query_as(&format!(
            "UPDATE workspaces
             SET name = $2, location = $3, floor = $4, kind = $5, capacity = $6, base_price = $7,
                 amenities = $8, image_url = $9, featured = $10, has_conference_hall = $11,
                 has_cabin = $12, updated_at = now()
             WHERE id = $1
             RETURNING {WORKSPACE_COLUMNS}"
        ))
        .bind(*id.as_uuid())
        .bind(details.name.trim())
        .bind(details.location.trim())
        .bind(&details.floor)
        .bind(details.kind.trim())
        .bind(details.capacity.trim())
        .bind(details.base_price)
        .bind(&details.amenities)
        .bind(&details.image_url)
        .bind(details.featured)
        .bind(details.features.has_conference_hall)
        .bind(details.features.has_cabin)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(e, "workspace"))?;
        Ok(row.map(Workspace::from))
    }

    async fn delete(&self, id: &WorkspaceId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM workspaces WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(e, "workspace"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: &WorkspaceId) -> StoreResult<Option<Workspace>> {
        let row: Option<WorkspaceRow> =
            sqlx::query_as(&format!("SELECT {WORKSPACE_COLUMNS} FROM workspaces WHERE id = $1"))
                .bind(*id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error(e, "workspace"))?;
        Ok(row.map(Workspace::from))
    }

    async fn list(&self) -> StoreResult<Vec<Workspace>> {
        let rows: Vec<WorkspaceRow> = sqlx::query_as(&format!(
            "SELECT {WORKSPACE_COLUMNS} FROM workspaces ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(e, "workspace"))?;
        Ok(rows.into_iter().map(Workspace::from).collect())
    }

    async fn list_by_location(&self, location: &str) -> StoreResult<Vec<Workspace>> {
        let rows: Vec<WorkspaceRow> = sqlx::query_as(&format!(
            "SELECT {WORKSPACE_COLUMNS} FROM workspaces
             WHERE location = $1
             ORDER BY created_at DESC"
        ))
        .bind(location)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(e, "workspace"))?;
        Ok(rows.into_iter().map(Workspace::from).collect())
    }

    async fn find_by_occupant(
        &self,
        occupant: &UserId,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Workspace>> {
        let row: Option<WorkspaceRow> = sqlx::query_as(&format!(
            "SELECT {WORKSPACE_COLUMNS} FROM workspaces
             WHERE allotted_to = $1 AND allotment_end > $2
             ORDER BY allotment_end DESC
             LIMIT 1"
        ))
        .bind(*occupant.as_uuid())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(e, "workspace"))?;
        Ok(row.map(Workspace::from))
    }

    async fn try_allot(
        &self,
        id: &WorkspaceId,
        allotment: &Allotment,
        now: DateTime<Utc>,
    ) -> StoreResult<AllotOutcome> {
        for _ in 0..ALLOT_ATTEMPTS {
            if let Some(workspace) = self.conditional_allot(id, allotment, now).await? {
                return Ok(AllotOutcome::Allotted(workspace));
            }
            let Some(current) = self.find_by_id(id).await? else {
                return Ok(AllotOutcome::Missing);
            };
            if let Some(held) = current.allotment.filter(|a| a.is_active(now)) {
                return Ok(AllotOutcome::Occupied(held));
            }
            tracing::debug!("Workspace {} freed while allotting, retrying", id);
        }
        Err(StoreError::Backend(format!(
            "allotment of workspace {id} kept racing with other writers"
        )))
    }

    async fn release(&self, id: &WorkspaceId, expected: Option<&Allotment>) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE workspaces
             SET allotted_to = NULL, allotment_start = NULL, allotment_end = NULL, updated_at = now()
             WHERE id = $1 AND allotted_to IS NOT NULL
               AND ($2::uuid IS NULL
                    OR (allotted_to = $2 AND allotment_start = $3 AND allotment_end = $4))",
        )
        .bind(*id.as_uuid())
        .bind(expected.map(|a| *a.allotted_to.as_uuid()))
        .bind(expected.map(|a| a.window.start))
        .bind(expected.map(|a| a.window.end))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, "workspace"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_active_allotments(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM workspaces WHERE allotted_to IS NOT NULL AND allotment_end > $1",
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error(e, "workspace"))?;
        Ok(to_u64(count))
    }
}
