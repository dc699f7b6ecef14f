use crate::application::access::Caller;
use crate::application::AppError;
use crate::domain::{ContactRequest, QuoteRequest, VisitRequest};
use crate::infrastructure::AppState;

pub async fn quotes(state: &AppState, caller: &Caller) -> Result<Vec<QuoteRequest>, AppError> {
    caller.require_admin()?;
    Ok(state.inquiry_repo.list_quotes().await?)
}

pub async fn contacts(state: &AppState, caller: &Caller) -> Result<Vec<ContactRequest>, AppError> {
    caller.require_admin()?;
    Ok(state.inquiry_repo.list_contacts().await?)
}

pub async fn visits(state: &AppState, caller: &Caller) -> Result<Vec<VisitRequest>, AppError> {
    caller.require_admin()?;
    Ok(state.inquiry_repo.list_visits().await?)
}
