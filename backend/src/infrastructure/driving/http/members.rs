use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use cohort_shared::{MemberPayload, MessageBody, ProfilePayload};

use crate::application::admin::commands::manage_members::{self, MemberCommand};
use crate::application::member::commands::profile::{self, ProfileCommand};
use crate::application::AppError;
use crate::domain::User;
use crate::infrastructure::driving::http::error::JsonBody;
use crate::infrastructure::driving::http::middleware::AuthenticatedUser;
use crate::infrastructure::AppState;

pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list).post(create))
        .route("/api/users/profile", get(show_profile).put(update_profile))
        .route("/api/users/:id", put(update).delete(remove))
}

fn command(body: MemberPayload) -> MemberCommand {
    MemberCommand {
        name: body.name,
        email: body.email,
        mobile: body.mobile,
        organization: body.organization,
        role: body.role,
        status: body.status,
    }
}

async fn list(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(manage_members::list(&state, &caller).await?))
}

async fn create(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    JsonBody(body): JsonBody<MemberPayload>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = manage_members::create(&state, &caller, command(body)).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<MemberPayload>,
) -> Result<Json<User>, AppError> {
    Ok(Json(manage_members::update(&state, &caller, &id, command(body)).await?))
}

async fn remove(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    manage_members::delete(&state, &caller, &id).await?;
    Ok(Json(MessageBody { message: "User removed".to_string() }))
}

async fn show_profile(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<Json<User>, AppError> {
    Ok(Json(profile::show(&state, &caller).await?))
}

async fn update_profile(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    JsonBody(body): JsonBody<ProfilePayload>,
) -> Result<Json<User>, AppError> {
    let cmd = ProfileCommand {
        name: body.name,
        email: body.email,
        mobile: body.mobile,
        organization: body.organization,
    };
    Ok(Json(profile::update(&state, &caller, cmd).await?))
}
