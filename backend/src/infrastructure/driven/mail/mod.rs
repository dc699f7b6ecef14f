pub mod smtp;
pub mod log_mailer;

pub use smtp::SmtpMailer;
pub use log_mailer::LogMailer;
