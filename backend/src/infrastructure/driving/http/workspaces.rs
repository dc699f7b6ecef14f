use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use cohort_shared::{AllotmentPayload, MessageBody, WorkspacePayload, WorkspaceQuery};

use crate::application::admin::commands::manage_workspaces::{self, AllotCommand, WorkspaceCommand};
use crate::application::member::commands::my_workspace::{self, CommunityMember};
use crate::application::occupants::{present_one, Contact, WorkspaceView};
use crate::application::public::commands::browse_workspaces;
use crate::application::AppError;
use crate::domain::WorkspaceFeatures;
use crate::infrastructure::driving::http::error::JsonBody;
use crate::infrastructure::driving::http::middleware::AuthenticatedUser;
use crate::infrastructure::AppState;

pub fn workspace_routes() -> Router<AppState> {
    Router::new()
        .route("/api/workspaces", get(list).post(create))
        .route("/api/workspaces/my-workspace", get(mine))
        .route("/api/workspaces/community", get(community))
        .route("/api/workspaces/:id", get(show).put(update).delete(remove))
        .route("/api/workspaces/:id/allotment", put(allot).delete(release))
}

impl From<WorkspacePayload> for WorkspaceCommand {
    fn from(body: WorkspacePayload) -> Self {
        Self {
            name: body.name,
            location: body.location,
            floor: body.floor,
            kind: body.kind,
            capacity: body.capacity,
            base_price: body.base_price,
            amenities: body.amenities,
            image_url: body.image_url,
            featured: body.featured,
            features: body.features.map(|f| WorkspaceFeatures {
                has_conference_hall: f.has_conference_hall,
                has_cabin: f.has_cabin,
            }),
        }
    }
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<Vec<WorkspaceView>>, AppError> {
    Ok(Json(browse_workspaces::list(&state, query.location).await?))
}

async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<WorkspaceView>, AppError> {
    Ok(Json(browse_workspaces::get(&state, &id).await?))
}

async fn create(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    JsonBody(body): JsonBody<WorkspacePayload>,
) -> Result<(StatusCode, Json<WorkspaceView>), AppError> {
    let workspace = manage_workspaces::create(&state, &caller, body.into()).await?;
    Ok((StatusCode::CREATED, Json(present_one(&state, workspace, Contact::Hidden).await?)))
}

async fn update(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<WorkspacePayload>,
) -> Result<Json<WorkspaceView>, AppError> {
    let workspace = manage_workspaces::update(&state, &caller, &id, body.into()).await?;
    Ok(Json(present_one(&state, workspace, Contact::Hidden).await?))
}

async fn remove(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    manage_workspaces::delete(&state, &caller, &id).await?;
    Ok(Json(MessageBody { message: "Workspace removed".to_string() }))
}

async fn allot(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<AllotmentPayload>,
) -> Result<Json<WorkspaceView>, AppError> {
    let cmd = AllotCommand {
        user_id: body.user_id,
        start_date: body.start_date,
        duration: body.duration,
    };
    let workspace = manage_workspaces::allot(&state, &caller, &id, cmd).await?;
    Ok(Json(present_one(&state, workspace, Contact::Hidden).await?))
}

async fn release(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<WorkspaceView>, AppError> {
    let workspace = manage_workspaces::release(&state, &caller, &id).await?;
    Ok(Json(present_one(&state, workspace, Contact::Hidden).await?))
}

async fn mine(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<Json<WorkspaceView>, AppError> {
    Ok(Json(my_workspace::execute(&state, &caller).await?))
}

async fn community(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<Json<Vec<CommunityMember>>, AppError> {
    Ok(Json(my_workspace::community(&state, &caller).await?))
}
