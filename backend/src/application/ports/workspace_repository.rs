// Driven port - Workspace catalogue and allotments (output port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::StoreResult;
use crate::domain::{Allotment, UserId, Workspace, WorkspaceDetails, WorkspaceId};

/// Result of the conditional allotment write.
#[derive(Debug, Clone)]
pub enum AllotOutcome {
    Allotted(Workspace),
    /// Someone else holds a running allotment; nothing was written.
    Occupied(Allotment),
    Missing,
}

#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    async fn save(&self, workspace: &Workspace) -> StoreResult<()>;
    /// Rewrites descriptive fields only; the allotment is left untouched.
    async fn update_details(
        &self,
        id: &WorkspaceId,
        details: &WorkspaceDetails,
    ) -> StoreResult<Option<Workspace>>;
    async fn delete(&self, id: &WorkspaceId) -> StoreResult<bool>;
    async fn find_by_id(&self, id: &WorkspaceId) -> StoreResult<Option<Workspace>>;
    /// Newest first.
    async fn list(&self) -> StoreResult<Vec<Workspace>>;
    async fn list_by_location(&self, location: &str) -> StoreResult<Vec<Workspace>>;
    /// The workspace whose allotment to `occupant` is still running at `now`.
    async fn find_by_occupant(
        &self,
        occupant: &UserId,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Workspace>>;
    /// Compare-and-swap: writes `allotment` only if the workspace has no
    /// occupant or the current allotment has lapsed at `now`. Implementations
    /// must make the check and the write a single atomic step.
    async fn try_allot(
        &self,
        id: &WorkspaceId,
        allotment: &Allotment,
        now: DateTime<Utc>,
    ) -> StoreResult<AllotOutcome>;
    /// Clears the allotment. With `expected`, only if the workspace still
    /// carries exactly that allotment (same occupant and same window).
    async fn release(&self, id: &WorkspaceId, expected: Option<&Allotment>) -> StoreResult<bool>;
    async fn count_active_allotments(&self, now: DateTime<Utc>) -> StoreResult<u64>;
}
