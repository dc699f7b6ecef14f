// Driven port - Invoices (output port)

use async_trait::async_trait;

use super::StoreResult;
use crate::application::access::RecordScope;
use crate::domain::{BookingId, Invoice, InvoiceId, InvoiceNumber, InvoiceStatus};

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Fails with `StoreError::Duplicate` when the invoice number is taken.
    async fn save(&self, invoice: &Invoice) -> StoreResult<()>;
    async fn find_by_number(&self, number: &InvoiceNumber) -> StoreResult<Option<Invoice>>;
    async fn find_by_booking(&self, booking_id: &BookingId) -> StoreResult<Option<Invoice>>;
    /// Newest first, filtered by customer email unless the scope is `All`.
    async fn list(&self, scope: &RecordScope) -> StoreResult<Vec<Invoice>>;
    async fn update_status(&self, id: &InvoiceId, status: InvoiceStatus) -> StoreResult<bool>;
    async fn count_by_status(&self, status: InvoiceStatus) -> StoreResult<u64>;
}
