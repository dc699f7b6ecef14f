// Application ports - Driven ports (output ports implemented by infrastructure)

use thiserror::Error;

pub mod user_repository;
pub mod workspace_repository;
pub mod booking_repository;
pub mod invoice_repository;
pub mod inquiry_repository;
pub mod day_pass_repository;
pub mod mailer;
pub mod invoice_numbers;

pub use user_repository::UserRepository;
pub use workspace_repository::{AllotOutcome, WorkspaceRepository};
pub use booking_repository::BookingRepository;
pub use invoice_repository::InvoiceRepository;
pub use inquiry_repository::InquiryRepository;
pub use day_pass_repository::DayPassRepository;
pub use mailer::{Mailer, OutgoingEmail};
#[cfg(test)]
pub use mailer::MockMailer;
pub use invoice_numbers::InvoiceNumberSource;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key (email, invoice number, pass code) is already taken.
    #[error("duplicate {0}")]
    Duplicate(String),

    #[error("storage failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
