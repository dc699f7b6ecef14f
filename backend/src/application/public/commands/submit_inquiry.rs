use chrono::Utc;

use crate::application::validation::{field, optional, parse_date, required};
use crate::application::AppError;
use crate::domain::*;
use crate::infrastructure::AppState;

#[derive(Debug, Clone, Default)]
pub struct SubmitQuoteCommand {
    pub full_name: Option<String>,
    pub work_email: Option<String>,
    pub contact_number: Option<String>,
    pub firm_name: Option<String>,
    pub firm_type: Option<String>,
    pub required_workspace: Option<String>,
    pub capacity: Option<i64>,
    pub start_date: Option<String>,
    pub duration: Option<String>,
    pub additional_requirements: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SubmitContactCommand {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SubmitVisitCommand {
    pub workspace_id: Option<String>,
    pub workspace_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub visit_date: Option<String>,
}

pub async fn submit_quote(state: &AppState, cmd: SubmitQuoteCommand) -> Result<QuoteRequest, AppError> {
    let full_name = required("Full name", &cmd.full_name)?;
    let work_email = required("Work email", &cmd.work_email)?;
    let contact_number = required("Contact number", &cmd.contact_number)?;
    let firm_name = required("Firm name", &cmd.firm_name)?;
    let firm_type = required("Firm type", &cmd.firm_type)?;
    let required_workspace = required("Required workspace", &cmd.required_workspace)?;
    let capacity = cmd
        .capacity
        .ok_or_else(|| AppError::Validation("Capacity is required".to_string()))?;
    let capacity = u32::try_from(capacity)
        .ok()
        .filter(|c| *c >= 1)
        .ok_or_else(|| AppError::Validation("Capacity must be at least 1".to_string()))?;
    let start_date = required("Start date", &cmd.start_date)?;
    let duration = required("Duration", &cmd.duration)?;

    let quote = QuoteRequest {
        id: RequestId::new(),
        full_name: field(DisplayName::new(full_name))?,
        work_email: field(Email::new(work_email))?,
        contact_number: field(ContactNumber::new(contact_number))?,
        firm_name: firm_name.to_string(),
        firm_type: firm_type.to_string(),
        required_workspace: required_workspace.to_string(),
        capacity,
        start_date: parse_date("Start date", start_date)?,
        duration: duration.to_string(),
        additional_requirements: optional(cmd.additional_requirements),
        status: InquiryStatus::Pending,
        created_at: Utc::now(),
    };
    state.inquiry_repo.save_quote(&quote).await?;
    tracing::info!(request = %quote.id, firm = %quote.firm_name, "quote request received");
    Ok(quote)
}

pub async fn submit_contact(state: &AppState, cmd: SubmitContactCommand) -> Result<ContactRequest, AppError> {
    let name = required("Name", &cmd.name)?;
    let email = required("Email", &cmd.email)?;
    let subject = required("Subject", &cmd.subject)?;
    let message = required("Message", &cmd.message)?;

    let contact = ContactRequest {
        id: RequestId::new(),
        name: field(DisplayName::new(name))?,
        email: field(Email::new(email))?,
        phone: optional(cmd.phone),
        subject: subject.to_string(),
        message: message.to_string(),
        status: InquiryStatus::Pending,
        created_at: Utc::now(),
    };
    state.inquiry_repo.save_contact(&contact).await?;
    tracing::info!(request = %contact.id, "contact request received");
    Ok(contact)
}

pub async fn submit_visit(state: &AppState, cmd: SubmitVisitCommand) -> Result<VisitRequest, AppError> {
    let workspace_id = required("Workspace id", &cmd.workspace_id)?;
    required("Workspace name", &cmd.workspace_name)?;
    let full_name = required("Full name", &cmd.full_name)?;
    let email = required("Email", &cmd.email)?;
    let contact_number = required("Contact number", &cmd.contact_number)?;
    let visit_date = required("Visit date", &cmd.visit_date)?;

    let workspace_id = field(WorkspaceId::parse(workspace_id))?;
    let workspace = state
        .workspace_repo
        .find_by_id(&workspace_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workspace not found".to_string()))?;

    let visit = VisitRequest {
        id: RequestId::new(),
        workspace_id,
        workspace_name: workspace.name,
        full_name: field(DisplayName::new(full_name))?,
        email: field(Email::new(email))?,
        contact_number: field(ContactNumber::new(contact_number))?,
        visit_date: parse_date("Visit date", visit_date)?,
        status: VisitStatus::Pending,
        created_at: Utc::now(),
    };
    state.inquiry_repo.save_visit(&visit).await?;
    tracing::info!(request = %visit.id, workspace = %visit.workspace_id, "visit request received");
    Ok(visit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestStore;

    fn quote() -> SubmitQuoteCommand {
        SubmitQuoteCommand {
            full_name: Some("Rahul Verma".into()),
            work_email: Some("rahul@finlabs.io".into()),
            contact_number: Some("9876543210".into()),
            firm_name: Some("FinLabs".into()),
            firm_type: Some("Startup".into()),
            required_workspace: Some("Private Office".into()),
            capacity: Some(12),
            start_date: Some("2026-12-01".into()),
            duration: Some("6 months".into()),
            additional_requirements: Some("   ".into()),
        }
    }

    #[tokio::test]
    async fn test_quote_is_stored_pending() {
        let store = TestStore::new();

        let saved = submit_quote(&store.state, quote()).await.unwrap();

        assert_eq!(saved.status, InquiryStatus::Pending);
        assert!(saved.additional_requirements.is_none());
        assert_eq!(store.state.inquiry_repo.count_quotes(InquiryStatus::Pending).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_quote_capacity_must_be_positive() {
        let store = TestStore::new();
        for bad in [0, -3] {
            let mut cmd = quote();
            cmd.capacity = Some(bad);
            let err = submit_quote(&store.state, cmd).await.unwrap_err();
            assert_eq!(err.to_string(), "Capacity must be at least 1");
        }
        let mut cmd = quote();
        cmd.capacity = None;
        assert_eq!(submit_quote(&store.state, cmd).await.unwrap_err().to_string(), "Capacity is required");
    }

    #[tokio::test]
    async fn test_contact_phone_is_optional() {
        let store = TestStore::new();
        let saved = submit_contact(
            &store.state,
            SubmitContactCommand {
                name: Some("Priya".into()),
                email: Some("priya@example.com".into()),
                phone: None,
                subject: Some("Parking".into()),
                message: Some("Is there parking for two-wheelers?".into()),
            },
        )
        .await
        .unwrap();
        assert!(saved.phone.is_none());

        let err = submit_contact(&store.state, SubmitContactCommand::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }

    #[tokio::test]
    async fn test_visit_requires_existing_workspace() {
        let store = TestStore::new();
        let workspace = store.workspace("Creative Studio", 12_999.0).await;
        let mut cmd = SubmitVisitCommand {
            workspace_id: Some(WorkspaceId::new().to_string()),
            workspace_name: Some("Creative Studio".into()),
            full_name: Some("Sneha Reddy".into()),
            email: Some("sneha@designhub.in".into()),
            contact_number: Some("9876543210".into()),
            visit_date: Some("2026-11-20".into()),
        };

        let err = submit_visit(&store.state, cmd.clone()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        cmd.workspace_id = Some(workspace.id.to_string());
        let visit = submit_visit(&store.state, cmd).await.unwrap();
        assert_eq!(visit.workspace_name, "Creative Studio");
        assert_eq!(visit.status, VisitStatus::Pending);
    }
}
