use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::workspace::Allotment;
use crate::domain::value_objects::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    #[serde(rename = "Awaiting Payment")]
    AwaitingPayment,
    Confirmed,
    Rejected,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::Pending,
        BookingStatus::AwaitingPayment,
        BookingStatus::Confirmed,
        BookingStatus::Rejected,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::AwaitingPayment => "Awaiting Payment",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Rejected => "Rejected",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| format!("Unknown booking status '{raw}'"))
    }

    /// The transition table enforced by the status-update operation.
    pub fn allowed_next(&self) -> &'static [BookingStatus] {
        use BookingStatus::*;
        match self {
            Pending => &[AwaitingPayment, Confirmed, Rejected, Cancelled],
            AwaitingPayment => &[Confirmed, Rejected, Cancelled],
            Confirmed => &[Completed, Cancelled],
            Rejected | Completed | Cancelled => &[],
        }
    }

    pub fn can_become(&self, next: BookingStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    /// Rejected and cancelled bookings give up their invoice and allotment.
    pub fn is_withdrawn(&self) -> bool {
        matches!(self, BookingStatus::Rejected | BookingStatus::Cancelled)
    }
}

/// Validated submission fields, before pricing and status derivation.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub workspace_id: WorkspaceId,
    pub workspace_name: String,
    pub full_name: DisplayName,
    pub email: Email,
    pub contact_number: ContactNumber,
    pub firm_name: Option<String>,
    pub duration: DurationSpec,
    pub raw_duration: String,
    pub start_date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub id: BookingId,
    pub workspace_id: WorkspaceId,
    pub workspace_name: String,
    pub full_name: DisplayName,
    pub email: Email,
    pub contact_number: ContactNumber,
    pub firm_name: Option<String>,
    pub duration: String,
    pub start_date: DateTime<Utc>,
    pub lease: LeaseWindow,
    pub total_amount: u64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: BookingStatus,
    pub invoice_number: InvoiceNumber,
    /// Set once this booking's allotment has been written to the workspace.
    pub occupant: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingRequest {
    /// Payment and booking status come from the payment method alone.
    pub fn submit(
        draft: BookingDraft,
        lease: LeaseWindow,
        total_amount: u64,
        invoice_number: InvoiceNumber,
        now: DateTime<Utc>,
    ) -> Self {
        let (status, payment_status) = if draft.payment_method.is_immediate() {
            (BookingStatus::Confirmed, PaymentStatus::Paid)
        } else {
            (BookingStatus::AwaitingPayment, PaymentStatus::Pending)
        };
        Self {
            id: BookingId::new(),
            workspace_id: draft.workspace_id,
            workspace_name: draft.workspace_name,
            full_name: draft.full_name,
            email: draft.email,
            contact_number: draft.contact_number,
            firm_name: draft.firm_name,
            duration: draft.raw_duration,
            start_date: draft.start_date,
            lease,
            total_amount,
            payment_method: draft.payment_method,
            payment_status,
            status,
            invoice_number,
            occupant: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The allotment this booking wrote, if any.
    pub fn allotment(&self) -> Option<Allotment> {
        self.occupant.as_ref().map(|occupant| Allotment {
            allotted_to: occupant.clone(),
            window: self.lease,
        })
    }

    /// Applies a status change. `Ok(false)` means the booking already had that
    /// status and nothing changed.
    pub fn transition_to(&mut self, next: BookingStatus) -> Result<bool, (BookingStatus, BookingStatus)> {
        if self.status == next {
            return Ok(false);
        }
        if !self.status.can_become(next) {
            return Err((self.status, next));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(true)
    }
}
