use chrono::Utc;
use serde::Serialize;

use crate::application::access::Caller;
use crate::application::AppError;
use crate::domain::{InquiryStatus, InvoiceStatus, UserStatus};
use crate::infrastructure::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_members: u64,
    pub new_quote_requests: u64,
    pub pending_invoices: u64,
    pub active_allotments: u64,
}

pub async fn execute(state: &AppState, caller: &Caller) -> Result<DashboardStats, AppError> {
    caller.require_admin()?;
    let (total_users, active_members, new_quote_requests, pending_invoices, active_allotments) = tokio::try_join!(
        state.user_repo.count(None),
        state.user_repo.count(Some(UserStatus::Active)),
        state.inquiry_repo.count_quotes(InquiryStatus::Pending),
        state.invoice_repo.count_by_status(InvoiceStatus::Pending),
        state.workspace_repo.count_active_allotments(Utc::now()),
    )?;
    Ok(DashboardStats {
        total_users,
        active_members,
        new_quote_requests,
        pending_invoices,
        active_allotments,
    })
}
