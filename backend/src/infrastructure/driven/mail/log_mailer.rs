use async_trait::async_trait;

use crate::application::ports::{Mailer, OutgoingEmail};

/// Used when no SMTP relay is configured: records the send and succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), String> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            bytes = email.html_body.len(),
            "mail relay not configured, email logged only"
        );
        Ok(())
    }
}
