// Infrastructure layer - external concerns (database, mail relay, HTTP)
// Implements interfaces defined in application layer

use std::sync::Arc;

use chrono::Duration;

use crate::application::ports::{
    BookingRepository, DayPassRepository, InquiryRepository, InvoiceNumberSource,
    InvoiceRepository, Mailer, UserRepository, WorkspaceRepository,
};

pub mod driven;    // Output adapters (repositories, mail relay, randomness)
pub mod driving;   // Input adapters (HTTP)

#[derive(Clone)]
pub struct AppState {
    pub jwt_secret: String,
    pub invoice_due_in: Duration,
    pub user_repo: Arc<dyn UserRepository>,
    pub workspace_repo: Arc<dyn WorkspaceRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub invoice_repo: Arc<dyn InvoiceRepository>,
    pub inquiry_repo: Arc<dyn InquiryRepository>,
    pub day_pass_repo: Arc<dyn DayPassRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub invoice_numbers: Arc<dyn InvoiceNumberSource>,
}
