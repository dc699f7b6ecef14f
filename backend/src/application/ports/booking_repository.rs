// Driven port - Booking requests (output port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::StoreResult;
use crate::application::access::RecordScope;
use crate::domain::{BookingId, BookingRequest, BookingStatus};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn save(&self, booking: &BookingRequest) -> StoreResult<()>;
    async fn delete(&self, id: &BookingId) -> StoreResult<bool>;
    async fn find_by_id(&self, id: &BookingId) -> StoreResult<Option<BookingRequest>>;
    async fn find_many(&self, ids: &[BookingId]) -> StoreResult<Vec<BookingRequest>>;
    /// Newest first, filtered by requester email unless the scope is `All`.
    async fn list(&self, scope: &RecordScope) -> StoreResult<Vec<BookingRequest>>;
    /// Writes `next` only while the stored status is still `expected`.
    async fn update_status(
        &self,
        id: &BookingId,
        expected: BookingStatus,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> StoreResult<bool>;
}
