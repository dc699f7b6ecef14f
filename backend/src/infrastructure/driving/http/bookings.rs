use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{post, put},
    Router,
};
use cohort_shared::{BookingStatusUpdate, BookingSubmission};

use crate::application::admin::commands::update_booking_status;
use crate::application::member::commands::list_bookings;
use crate::application::public::commands::submit_booking::{self, BookingReceipt, SubmitBookingCommand};
use crate::application::AppError;
use crate::domain::BookingRequest;
use crate::infrastructure::driving::http::error::JsonBody;
use crate::infrastructure::driving::http::middleware::{AuthenticatedUser, OptionalUser};
use crate::infrastructure::AppState;

pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(submit).get(list))
        .route("/api/bookings/:id/status", put(update_status))
}

async fn submit(
    State(state): State<AppState>,
    OptionalUser(session): OptionalUser,
    JsonBody(body): JsonBody<BookingSubmission>,
) -> Result<(StatusCode, Json<BookingReceipt>), AppError> {
    let cmd = SubmitBookingCommand {
        full_name: body.full_name,
        email: body.email,
        contact_number: body.contact_number,
        firm_name: body.firm_name,
        duration: body.duration,
        start_date: body.start_date,
        workspace_id: body.workspace_id,
        workspace_name: body.workspace_name,
        payment_method: body.payment_method,
    };
    let receipt = submit_booking::execute(&state, session.as_ref(), cmd).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

async fn list(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<Json<Vec<BookingRequest>>, AppError> {
    Ok(Json(list_bookings::execute(&state, &caller).await?))
}

async fn update_status(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<BookingStatusUpdate>,
) -> Result<Json<BookingRequest>, AppError> {
    Ok(Json(update_booking_status::execute(&state, &caller, &id, body.status).await?))
}
