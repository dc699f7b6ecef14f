use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use cohort_shared::{ContactSubmission, QuoteSubmission, VisitSubmission};

use crate::application::admin::commands::dashboard_stats::{self, DashboardStats};
use crate::application::admin::commands::list_inquiries;
use crate::application::public::commands::submit_inquiry::{
    self, SubmitContactCommand, SubmitQuoteCommand, SubmitVisitCommand,
};
use crate::application::AppError;
use crate::domain::{ContactRequest, QuoteRequest, VisitRequest};
use crate::infrastructure::driving::http::error::JsonBody;
use crate::infrastructure::driving::http::middleware::AuthenticatedUser;
use crate::infrastructure::AppState;

pub fn inquiry_routes() -> Router<AppState> {
    Router::new()
        .route("/api/requests/quote", post(submit_quote).get(list_quotes))
        .route("/api/requests/contact", post(submit_contact).get(list_contacts))
        .route("/api/requests/visit", post(submit_visit).get(list_visits))
        .route("/api/requests/stats", get(stats))
}

async fn submit_quote(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<QuoteSubmission>,
) -> Result<(StatusCode, Json<QuoteRequest>), AppError> {
    let cmd = SubmitQuoteCommand {
        full_name: body.full_name,
        work_email: body.work_email,
        contact_number: body.contact_number,
        firm_name: body.firm_name,
        firm_type: body.firm_type,
        required_workspace: body.required_workspace,
        capacity: body.capacity,
        start_date: body.start_date,
        duration: body.duration,
        additional_requirements: body.additional_requirements,
    };
    Ok((StatusCode::CREATED, Json(submit_inquiry::submit_quote(&state, cmd).await?)))
}

async fn submit_contact(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ContactSubmission>,
) -> Result<(StatusCode, Json<ContactRequest>), AppError> {
    let cmd = SubmitContactCommand {
        name: body.name,
        email: body.email,
        phone: body.phone,
        subject: body.subject,
        message: body.message,
    };
    Ok((StatusCode::CREATED, Json(submit_inquiry::submit_contact(&state, cmd).await?)))
}

async fn submit_visit(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<VisitSubmission>,
) -> Result<(StatusCode, Json<VisitRequest>), AppError> {
    let cmd = SubmitVisitCommand {
        workspace_id: body.workspace_id,
        workspace_name: body.workspace_name,
        full_name: body.full_name,
        email: body.email,
        contact_number: body.contact_number,
        visit_date: body.visit_date,
    };
    Ok((StatusCode::CREATED, Json(submit_inquiry::submit_visit(&state, cmd).await?)))
}

async fn list_quotes(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<Json<Vec<QuoteRequest>>, AppError> {
    Ok(Json(list_inquiries::quotes(&state, &caller).await?))
}

async fn list_contacts(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<Json<Vec<ContactRequest>>, AppError> {
    Ok(Json(list_inquiries::contacts(&state, &caller).await?))
}

async fn list_visits(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<Json<Vec<VisitRequest>>, AppError> {
    Ok(Json(list_inquiries::visits(&state, &caller).await?))
}

async fn stats(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(dashboard_stats::execute(&state, &caller).await?))
}
