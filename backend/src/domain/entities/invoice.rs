use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::booking_request::BookingRequest;
use crate::domain::value_objects::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_db_str(raw: &str) -> Self {
        match raw {
            "Paid" => InvoiceStatus::Paid,
            "Cancelled" => InvoiceStatus::Cancelled,
            _ => InvoiceStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: InvoiceNumber,
    pub booking_id: BookingId,
    pub user_id: Option<UserId>,
    pub customer_name: String,
    pub customer_email: Email,
    pub workspace_name: String,
    pub amount: u64,
    pub payment_method: PaymentMethod,
    pub status: InvoiceStatus,
    /// Only deferred payments carry a due date.
    pub due_date: Option<DateTime<Utc>>,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    pub fn issue(
        booking: &BookingRequest,
        payer: Option<UserId>,
        due_in: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, String> {
        if booking.invoice_number.as_str().is_empty() {
            return Err("Invoice number is required".to_string());
        }
        if booking.workspace_name.trim().is_empty() {
            return Err("Workspace name is required".to_string());
        }
        let immediate = booking.payment_method.is_immediate();
        Ok(Self {
            id: InvoiceId::new(),
            invoice_number: booking.invoice_number.clone(),
            booking_id: booking.id,
            user_id: payer,
            customer_name: booking.full_name.as_str().to_string(),
            customer_email: booking.email.clone(),
            workspace_name: booking.workspace_name.clone(),
            amount: booking.total_amount,
            payment_method: booking.payment_method,
            status: if immediate { InvoiceStatus::Paid } else { InvoiceStatus::Pending },
            due_date: (!immediate).then(|| now + due_in),
            paid_date: immediate.then_some(now),
            created_at: now,
        })
    }

    /// Cancels a still-open invoice. Paid invoices are left as the payment record.
    pub fn cancel(&mut self) -> bool {
        if self.status != InvoiceStatus::Pending {
            return false;
        }
        self.status = InvoiceStatus::Cancelled;
        true
    }
}
