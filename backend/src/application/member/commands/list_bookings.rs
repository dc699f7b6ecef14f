use crate::application::access::{Caller, RecordScope};
use crate::application::AppError;
use crate::domain::BookingRequest;
use crate::infrastructure::AppState;

/// Admins see every booking; everyone else sees the ones made with their email.
pub async fn execute(state: &AppState, caller: &Caller) -> Result<Vec<BookingRequest>, AppError> {
    let scope = RecordScope::for_caller(caller);
    Ok(state.booking_repo.list(&scope).await?)
}
