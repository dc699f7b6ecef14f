// Row shapes read back from Postgres. Each converts into its domain type; a
// row that no longer satisfies the domain rules surfaces as a backend error.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::application::ports::StoreError;
use crate::domain::*;

fn corrupt(table: &str, detail: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(format!("corrupt {table} row: {detail}"))
}

/// Money and counts are unsigned in the domain and BIGINT/INTEGER in the schema.
pub(super) fn to_i64(value: u64) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::Backend(format!("{value} does not fit a BIGINT")))
}

pub(super) fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

pub(super) fn payment_status_str(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => "Paid",
        PaymentStatus::Pending => "Pending",
    }
}

#[derive(Debug, FromRow)]
pub(super) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub organization: Option<String>,
    pub role: String,
    pub status: String,
    pub joined_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&row.role).ok_or_else(|| corrupt("users", &row.role))?;
        let mobile = row
            .mobile
            .map(ContactNumber::new)
            .transpose()
            .map_err(|e| corrupt("users", e))?;
        Ok(User::from_persistence(
            UserId::from_uuid(row.id),
            DisplayName::new(row.name).map_err(|e| corrupt("users", e))?,
            Email::new(row.email).map_err(|e| corrupt("users", e))?,
            mobile,
            row.organization,
            role,
            UserStatus::from_db_str(&row.status),
            row.joined_at,
        ))
    }
}

#[derive(Debug, FromRow)]
pub(super) struct WorkspaceRow {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub floor: Option<String>,
    pub kind: String,
    pub capacity: String,
    pub base_price: f64,
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub has_conference_hall: bool,
    pub has_cabin: bool,
    pub allotted_to: Option<Uuid>,
    pub allotment_start: Option<DateTime<Utc>>,
    pub allotment_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkspaceRow> for Workspace {
    fn from(row: WorkspaceRow) -> Self {
        let allotment = match (row.allotted_to, row.allotment_start, row.allotment_end) {
            (Some(holder), Some(start), Some(end)) => Some(Allotment {
                allotted_to: UserId::from_uuid(holder),
                window: LeaseWindow { start, end },
            }),
            _ => None,
        };
        Workspace {
            id: WorkspaceId::from_uuid(row.id),
            name: row.name,
            location: row.location,
            floor: row.floor,
            kind: row.kind,
            capacity: row.capacity,
            base_price: row.base_price,
            amenities: row.amenities,
            image_url: row.image_url,
            featured: row.featured,
            features: WorkspaceFeatures {
                has_conference_hall: row.has_conference_hall,
                has_cabin: row.has_cabin,
            },
            allotment,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct BookingRow {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub workspace_name: String,
    pub full_name: String,
    pub email: String,
    pub contact_number: String,
    pub firm_name: Option<String>,
    pub duration: String,
    pub start_date: DateTime<Utc>,
    pub lease_start: DateTime<Utc>,
    pub lease_end: DateTime<Utc>,
    pub total_amount: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub status: String,
    pub invoice_number: String,
    pub occupant: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for BookingRequest {
    type Error = StoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let bad = |e: String| corrupt("bookings", e);
        Ok(BookingRequest {
            id: BookingId::from_uuid(row.id),
            workspace_id: WorkspaceId::from_uuid(row.workspace_id),
            workspace_name: row.workspace_name,
            full_name: DisplayName::new(row.full_name).map_err(bad)?,
            email: Email::new(row.email).map_err(bad)?,
            contact_number: ContactNumber::new(row.contact_number).map_err(bad)?,
            firm_name: row.firm_name,
            duration: row.duration,
            start_date: row.start_date,
            lease: LeaseWindow {
                start: row.lease_start,
                end: row.lease_end,
            },
            total_amount: to_u64(row.total_amount),
            payment_method: PaymentMethod::parse(&row.payment_method).map_err(bad)?,
            payment_status: match row.payment_status.as_str() {
                "Paid" => PaymentStatus::Paid,
                _ => PaymentStatus::Pending,
            },
            status: BookingStatus::parse(&row.status).map_err(bad)?,
            invoice_number: InvoiceNumber::parse(&row.invoice_number).map_err(bad)?,
            occupant: row.occupant.map(UserId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct InvoiceRow {
    pub id: Uuid,
    pub invoice_number: String,
    pub booking_id: Uuid,
    pub user_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_email: String,
    pub workspace_name: String,
    pub amount: i64,
    pub payment_method: String,
    pub status: String,
    pub due_date: Option<DateTime<Utc>>,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = StoreError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        let bad = |e: String| corrupt("invoices", e);
        Ok(Invoice {
            id: InvoiceId::from_uuid(row.id),
            invoice_number: InvoiceNumber::parse(&row.invoice_number).map_err(bad)?,
            booking_id: BookingId::from_uuid(row.booking_id),
            user_id: row.user_id.map(UserId::from_uuid),
            customer_name: row.customer_name,
            customer_email: Email::new(row.customer_email).map_err(bad)?,
            workspace_name: row.workspace_name,
            amount: to_u64(row.amount),
            payment_method: PaymentMethod::parse(&row.payment_method).map_err(bad)?,
            status: InvoiceStatus::from_db_str(&row.status),
            due_date: row.due_date,
            paid_date: row.paid_date,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct QuoteRow {
    pub id: Uuid,
    pub full_name: String,
    pub work_email: String,
    pub contact_number: String,
    pub firm_name: String,
    pub firm_type: String,
    pub required_workspace: String,
    pub capacity: i32,
    pub start_date: DateTime<Utc>,
    pub duration: String,
    pub additional_requirements: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<QuoteRow> for QuoteRequest {
    type Error = StoreError;

    fn try_from(row: QuoteRow) -> Result<Self, Self::Error> {
        let bad = |e: String| corrupt("quote_requests", e);
        Ok(QuoteRequest {
            id: RequestId::from_uuid(row.id),
            full_name: DisplayName::new(row.full_name).map_err(bad)?,
            work_email: Email::new(row.work_email).map_err(bad)?,
            contact_number: ContactNumber::new(row.contact_number).map_err(bad)?,
            firm_name: row.firm_name,
            firm_type: row.firm_type,
            required_workspace: row.required_workspace,
            capacity: u32::try_from(row.capacity).map_err(|e| corrupt("quote_requests", e))?,
            start_date: row.start_date,
            duration: row.duration,
            additional_requirements: row.additional_requirements,
            status: InquiryStatus::from_db_str(&row.status),
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ContactRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for ContactRequest {
    type Error = StoreError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let bad = |e: String| corrupt("contact_requests", e);
        Ok(ContactRequest {
            id: RequestId::from_uuid(row.id),
            name: DisplayName::new(row.name).map_err(bad)?,
            email: Email::new(row.email).map_err(bad)?,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            status: InquiryStatus::from_db_str(&row.status),
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct VisitRow {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub workspace_name: String,
    pub full_name: String,
    pub email: String,
    pub contact_number: String,
    pub visit_date: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<VisitRow> for VisitRequest {
    type Error = StoreError;

    fn try_from(row: VisitRow) -> Result<Self, Self::Error> {
        let bad = |e: String| corrupt("visit_requests", e);
        Ok(VisitRequest {
            id: RequestId::from_uuid(row.id),
            workspace_id: WorkspaceId::from_uuid(row.workspace_id),
            workspace_name: row.workspace_name,
            full_name: DisplayName::new(row.full_name).map_err(bad)?,
            email: Email::new(row.email).map_err(bad)?,
            contact_number: ContactNumber::new(row.contact_number).map_err(bad)?,
            visit_date: row.visit_date,
            status: VisitStatus::from_db_str(&row.status),
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct DayPassRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub purpose: String,
    pub visit_date: DateTime<Utc>,
    pub pass_code: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DayPassRow> for DayPass {
    type Error = StoreError;

    fn try_from(row: DayPassRow) -> Result<Self, Self::Error> {
        let bad = |e: String| corrupt("day_passes", e);
        Ok(DayPass {
            id: RequestId::from_uuid(row.id),
            name: DisplayName::new(row.name).map_err(bad)?,
            email: Email::new(row.email).map_err(bad)?,
            contact: ContactNumber::new(row.contact).map_err(bad)?,
            purpose: row.purpose,
            visit_date: row.visit_date,
            pass_code: PassCode::from_raw(row.pass_code),
            status: DayPassStatus::from_db_str(&row.status),
            created_at: row.created_at,
        })
    }
}

/// Converts a batch of rows, failing on the first one that does not decode.
pub(super) fn decode_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, StoreError>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}
