use chrono::{NaiveDate, Utc};

use crate::application::access::Caller;
use crate::application::AppError;
use crate::domain::{DayPass, DayPassStatus, PassCode, RedeemRefusal, UserRole};
use crate::infrastructure::AppState;

const FRONT_DESK: [UserRole; 2] = [UserRole::Admin, UserRole::Authenticator];

pub async fn list(state: &AppState, caller: &Caller) -> Result<Vec<DayPass>, AppError> {
    caller.require_any(&FRONT_DESK)?;
    Ok(state.day_pass_repo.list().await?)
}

pub async fn verify(state: &AppState, caller: &Caller, raw_code: &str) -> Result<DayPass, AppError> {
    verify_on(state, caller, raw_code, Utc::now().date_naive()).await
}

/// Redeems a pass on `today`. The Pending to Used flip is conditional, so two
/// desks scanning the same code cannot both admit it.
pub async fn verify_on(
    state: &AppState,
    caller: &Caller,
    raw_code: &str,
    today: NaiveDate,
) -> Result<DayPass, AppError> {
    caller.require_any(&FRONT_DESK)?;
    let code = PassCode::from_raw(raw_code);
    let mut pass = state
        .day_pass_repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid pass code".to_string()))?;

    pass.check_redeemable(today).map_err(|refusal| AppError::Validation(refusal_message(&refusal)))?;

    if !state.day_pass_repo.mark_used(&code).await? {
        return Err(AppError::Validation(refusal_message(&RedeemRefusal::AlreadyUsed)));
    }
    pass.status = DayPassStatus::Used;
    tracing::info!(pass = %code, by = %caller.email, "day pass redeemed");
    Ok(pass)
}

fn refusal_message(refusal: &RedeemRefusal) -> String {
    match refusal {
        RedeemRefusal::AlreadyUsed => "This pass has already been used".to_string(),
        RedeemRefusal::Expired => "This pass has expired".to_string(),
        RedeemRefusal::WrongDay(date) => {
            format!("This pass is valid for {}, not today.", date.format("%B %-d, %Y"))
        }
    }
}
