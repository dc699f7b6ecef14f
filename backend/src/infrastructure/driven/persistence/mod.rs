// Driven adapters - storage. In-memory stores back tests and database-less
// runs; the Postgres stores back production.

pub mod in_memory;
mod db_types;
pub mod user_repository;
pub mod workspace_repository;
pub mod booking_repository;
pub mod invoice_repository;
pub mod inquiry_repository;
pub mod day_pass_repository;

use crate::application::ports::StoreError;

pub use in_memory::{
    InMemoryBookingRepository, InMemoryDayPassRepository, InMemoryInquiryRepository,
    InMemoryInvoiceRepository, InMemoryUserRepository, InMemoryWorkspaceRepository,
};
pub use user_repository::PostgresUserRepository;
pub use workspace_repository::PostgresWorkspaceRepository;
pub use booking_repository::PostgresBookingRepository;
pub use invoice_repository::PostgresInvoiceRepository;
pub use inquiry_repository::PostgresInquiryRepository;
pub use day_pass_repository::PostgresDayPassRepository;

/// Unique-key violations become `Duplicate(what)`; everything else is a backend failure.
fn db_error(error: sqlx::Error, what: &str) -> StoreError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() {
            return StoreError::Duplicate(what.to_string());
        }
    }
    StoreError::Backend(format!("Database error: {}", error))
}
