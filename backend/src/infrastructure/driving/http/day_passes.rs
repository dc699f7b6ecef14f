use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use cohort_shared::DayPassApplication;

use crate::application::front_desk::commands::day_passes;
use crate::application::public::commands::request_day_pass::{self, RequestDayPassCommand};
use crate::application::AppError;
use crate::domain::DayPass;
use crate::infrastructure::driving::http::error::JsonBody;
use crate::infrastructure::driving::http::middleware::AuthenticatedUser;
use crate::infrastructure::AppState;

pub fn day_pass_routes() -> Router<AppState> {
    Router::new()
        .route("/api/daypass", post(request).get(list))
        .route("/api/daypass/verify/:pass_code", get(verify))
}

async fn request(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DayPassApplication>,
) -> Result<(StatusCode, Json<DayPass>), AppError> {
    let cmd = RequestDayPassCommand {
        name: body.name,
        email: body.email,
        contact: body.contact,
        purpose: body.purpose,
        visit_date: body.visit_date,
    };
    Ok((StatusCode::CREATED, Json(request_day_pass::execute(&state, cmd).await?)))
}

async fn list(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<Json<Vec<DayPass>>, AppError> {
    Ok(Json(day_passes::list(&state, &caller).await?))
}

async fn verify(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(pass_code): Path<String>,
) -> Result<Json<DayPass>, AppError> {
    Ok(Json(day_passes::verify(&state, &caller, &pass_code).await?))
}
