// Invoice issuer: one invoice per booking, written after the booking itself.

use chrono::{DateTime, Duration, Utc};

use crate::application::ports::InvoiceRepository;
use crate::application::AppError;
use crate::domain::{BookingRequest, Invoice, UserId};

pub async fn issue(
    invoices: &dyn InvoiceRepository,
    booking: &BookingRequest,
    payer: Option<UserId>,
    due_in: Duration,
    now: DateTime<Utc>,
) -> Result<Invoice, AppError> {
    let invoice = Invoice::issue(booking, payer, due_in, now).map_err(AppError::Validation)?;
    invoices.save(&invoice).await?;
    tracing::info!(
        invoice = %invoice.invoice_number,
        booking = %booking.id,
        status = invoice.status.as_db_str(),
        "invoice issued"
    );
    Ok(invoice)
}
