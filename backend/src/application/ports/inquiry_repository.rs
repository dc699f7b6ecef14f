// Driven port - Quote, contact and visit requests (output port)

use async_trait::async_trait;

use super::StoreResult;
use crate::domain::{ContactRequest, InquiryStatus, QuoteRequest, VisitRequest};

#[async_trait]
pub trait InquiryRepository: Send + Sync {
    async fn save_quote(&self, quote: &QuoteRequest) -> StoreResult<()>;
    async fn list_quotes(&self) -> StoreResult<Vec<QuoteRequest>>;
    async fn count_quotes(&self, status: InquiryStatus) -> StoreResult<u64>;
    async fn save_contact(&self, contact: &ContactRequest) -> StoreResult<()>;
    async fn list_contacts(&self) -> StoreResult<Vec<ContactRequest>>;
    async fn save_visit(&self, visit: &VisitRequest) -> StoreResult<()>;
    async fn list_visits(&self) -> StoreResult<Vec<VisitRequest>>;
}
