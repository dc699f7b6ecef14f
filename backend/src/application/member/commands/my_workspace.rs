use chrono::Utc;
use serde::Serialize;

use crate::application::access::Caller;
use crate::application::occupants::{present_one, Contact, WorkspaceView};
use crate::application::AppError;
use crate::domain::{UserId, UserRole};
use crate::infrastructure::AppState;

/// Public profile of a neighbour, without contact details beyond email.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityProfile {
    pub name: String,
    pub email: String,
    pub organization: Option<String>,
    pub role: UserRole,
    pub joined_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityMember {
    pub workspace_name: String,
    pub user: CommunityProfile,
}

/// The caller's running allotment, with their own contact details.
pub async fn execute(state: &AppState, caller: &Caller) -> Result<WorkspaceView, AppError> {
    let workspace = state
        .workspace_repo
        .find_by_occupant(&caller.id, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound("No workspace allotted to you".to_string()))?;
    present_one(state, workspace, Contact::Shown).await
}

/// Other occupants at the same location as the caller's current workspace.
pub async fn community(state: &AppState, caller: &Caller) -> Result<Vec<CommunityMember>, AppError> {
    let now = Utc::now();
    let mine = state
        .workspace_repo
        .find_by_occupant(&caller.id, now)
        .await?
        .ok_or_else(|| AppError::NotFound("Join a workspace to see your community".to_string()))?;

    let neighbours: Vec<(String, UserId)> = state
        .workspace_repo
        .list_by_location(&mine.location)
        .await?
        .into_iter()
        .filter_map(|ws| {
            let occupant = ws.active_occupant(now)?.clone();
            (occupant != caller.id).then_some((ws.name, occupant))
        })
        .collect();

    let ids: Vec<UserId> = neighbours.iter().map(|(_, id)| id.clone()).collect();
    let users = state.user_repo.find_many(&ids).await?;

    Ok(neighbours
        .into_iter()
        .filter_map(|(workspace_name, id)| {
            let user = users.iter().find(|u| u.id() == &id)?;
            Some(CommunityMember {
                workspace_name,
                user: CommunityProfile {
                    name: user.name().to_string(),
                    email: user.email().to_string(),
                    organization: user.organization().map(str::to_string),
                    role: user.role(),
                    joined_at: user.joined_at(),
                },
            })
        })
        .collect())
}
