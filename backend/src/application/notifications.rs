// Best-effort side channel: delivery failures are logged and swallowed so a
// booking, member or day pass never depends on the mail relay.

use crate::application::ports::{Mailer, OutgoingEmail};
use crate::domain::{DayPass, User};

pub async fn send_best_effort(mailer: &dyn Mailer, email: OutgoingEmail) {
    let to = email.to.clone();
    let subject = email.subject.clone();
    match mailer.send(email).await {
        Ok(()) => tracing::info!(to = %to, subject = %subject, "email sent"),
        Err(e) => tracing::warn!(to = %to, subject = %subject, error = %e, "email delivery failed"),
    }
}

pub fn welcome_email(user: &User) -> OutgoingEmail {
    OutgoingEmail {
        to: user.email().clone(),
        subject: "Welcome to Cohort Ecosystem".to_string(),
        html_body: format!(
            "<h1>Welcome, {}!</h1>\
             <p>Your Cohort member profile is ready. Sign in to browse workspaces, \
             track your bookings and download invoices.</p>\
             <p>Best regards,<br/>Cohort Team</p>",
            user.name()
        ),
    }
}

pub fn day_pass_email(pass: &DayPass) -> OutgoingEmail {
    OutgoingEmail {
        to: pass.email.clone(),
        subject: "Your Cohort Day Pass".to_string(),
        html_body: format!(
            "<h1>Hello {},</h1>\
             <p>Your Day Pass for {} is confirmed.</p>\
             <p><strong>Pass Code:</strong> {}</p>\
             <p>Please present this code at the reception when you arrive.</p>\
             <p>Best regards,<br/>Cohort Team</p>",
            pass.name,
            pass.visit_date.format("%B %-d, %Y"),
            pass.pass_code
        ),
    }
}
