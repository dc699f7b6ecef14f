use crate::application::occupants::{present, present_one, Contact, WorkspaceView};
use crate::application::validation::optional;
use crate::application::AppError;
use crate::domain::{Workspace, WorkspaceId};
use crate::infrastructure::AppState;

/// Newest first, optionally narrowed to one location.
pub async fn list(state: &AppState, location: Option<String>) -> Result<Vec<WorkspaceView>, AppError> {
    let workspaces = match optional(location) {
        Some(location) => state.workspace_repo.list_by_location(&location).await?,
        None => state.workspace_repo.list().await?,
    };
    present(state, workspaces, Contact::Hidden).await
}

pub async fn get(state: &AppState, raw_id: &str) -> Result<WorkspaceView, AppError> {
    let id = WorkspaceId::parse(raw_id).map_err(|_| AppError::NotFound("Workspace not found".to_string()))?;
    let workspace: Workspace = state
        .workspace_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workspace not found".to_string()))?;
    present_one(state, workspace, Contact::Hidden).await
}
