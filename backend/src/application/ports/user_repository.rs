// Driven port - Member directory (output port)

use async_trait::async_trait;

use super::StoreResult;
use crate::domain::{Email, User, UserId, UserStatus};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `StoreError::Duplicate` when the email is taken.
    async fn save(&self, user: &User) -> StoreResult<()>;
    /// Overwrites an existing entry; `false` when the id is unknown.
    async fn update(&self, user: &User) -> StoreResult<bool>;
    async fn delete(&self, id: &UserId) -> StoreResult<bool>;
    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>>;
    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<User>>;
    async fn find_many(&self, ids: &[UserId]) -> StoreResult<Vec<User>>;
    /// Newest first.
    async fn list(&self) -> StoreResult<Vec<User>>;
    async fn count(&self, status: Option<UserStatus>) -> StoreResult<u64>;
}
