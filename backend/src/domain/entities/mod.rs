pub mod user;
pub mod workspace;
pub mod booking_request;
pub mod invoice;
pub mod inquiry;
pub mod day_pass;

pub use user::{User, UserPatch};
pub use workspace::{Allotment, Workspace, WorkspaceDetails, WorkspaceFeatures};
pub use booking_request::{BookingDraft, BookingRequest, BookingStatus, PaymentStatus};
pub use invoice::{Invoice, InvoiceStatus};
pub use inquiry::{ContactRequest, InquiryStatus, QuoteRequest, VisitRequest, VisitStatus};
pub use day_pass::{DayPass, DayPassStatus, RedeemRefusal};
