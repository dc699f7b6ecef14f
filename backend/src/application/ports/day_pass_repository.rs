// Driven port - Day passes (output port)

use async_trait::async_trait;

use super::StoreResult;
use crate::domain::{DayPass, PassCode};

#[async_trait]
pub trait DayPassRepository: Send + Sync {
    async fn save(&self, pass: &DayPass) -> StoreResult<()>;
    /// Newest first.
    async fn list(&self) -> StoreResult<Vec<DayPass>>;
    async fn find_by_code(&self, code: &PassCode) -> StoreResult<Option<DayPass>>;
    /// Flips Pending to Used; `false` when the pass was not Pending any more.
    async fn mark_used(&self, code: &PassCode) -> StoreResult<bool>;
}
