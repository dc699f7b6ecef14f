pub mod persistence;
pub mod mail;
pub mod invoice_numbers;

pub use persistence::*;
pub use mail::{LogMailer, SmtpMailer};
pub use invoice_numbers::OsRandomInvoiceNumbers;
