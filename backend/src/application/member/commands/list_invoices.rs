use std::collections::HashMap;

use serde::Serialize;

use crate::application::access::{Caller, RecordScope};
use crate::application::AppError;
use crate::domain::{BookingId, BookingRequest, Invoice};
use crate::infrastructure::AppState;

/// An invoice with the booking it bills, as shown on the invoices page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceWithBooking {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub booking: Option<BookingRequest>,
}

pub async fn execute(state: &AppState, caller: &Caller) -> Result<Vec<InvoiceWithBooking>, AppError> {
    let scope = RecordScope::for_caller(caller);
    let invoices = state.invoice_repo.list(&scope).await?;

    let ids: Vec<BookingId> = invoices.iter().map(|i| i.booking_id).collect();
    let mut bookings: HashMap<BookingId, BookingRequest> = state
        .booking_repo
        .find_many(&ids)
        .await?
        .into_iter()
        .map(|b| (b.id, b))
        .collect();

    Ok(invoices
        .into_iter()
        .map(|invoice| {
            let booking = bookings.remove(&invoice.booking_id);
            InvoiceWithBooking { invoice, booking }
        })
        .collect())
}
