pub mod user_id;
pub mod record_id;
pub mod email;
pub mod contact_number;
pub mod display_name;
pub mod user_role;
pub mod user_status;
pub mod payment_method;
pub mod invoice_number;
pub mod pass_code;
pub mod duration_spec;
pub mod lease_window;

pub use user_id::UserId;
pub use record_id::{BookingId, InvoiceId, RequestId, WorkspaceId};
pub use email::Email;
pub use contact_number::ContactNumber;
pub use display_name::DisplayName;
pub use user_role::UserRole;
pub use user_status::UserStatus;
pub use payment_method::PaymentMethod;
pub use invoice_number::InvoiceNumber;
pub use pass_code::PassCode;
pub use duration_spec::{DurationSpec, DurationUnit};
pub use lease_window::LeaseWindow;
