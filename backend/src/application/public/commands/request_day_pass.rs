use crate::application::notifications::{day_pass_email, send_best_effort};
use crate::application::validation::{field, parse_date, required};
use crate::application::AppError;
use crate::domain::*;
use crate::infrastructure::AppState;

#[derive(Debug, Clone, Default)]
pub struct RequestDayPassCommand {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub purpose: Option<String>,
    pub visit_date: Option<String>,
}

/// Issues a pass and mails its code. A failed delivery does not undo the pass.
pub async fn execute(state: &AppState, cmd: RequestDayPassCommand) -> Result<DayPass, AppError> {
    let name = required("Name", &cmd.name)?;
    let email = required("Email", &cmd.email)?;
    let contact = required("Contact", &cmd.contact)?;
    let purpose = required("Purpose", &cmd.purpose)?;
    let visit_date = required("Visit date", &cmd.visit_date)?;

    let pass = DayPass::issue(
        field(DisplayName::new(name))?,
        field(Email::new(email))?,
        field(ContactNumber::new(contact))?,
        purpose.to_string(),
        parse_date("Visit date", visit_date)?,
    );
    state.day_pass_repo.save(&pass).await?;
    tracing::info!(pass = %pass.pass_code, visit = %pass.visit_date.date_naive(), "day pass issued");

    send_best_effort(&*state.mailer, day_pass_email(&pass)).await;
    Ok(pass)
}
