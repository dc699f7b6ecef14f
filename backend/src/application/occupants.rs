use serde::Serialize;

use crate::application::AppError;
use crate::domain::{LeaseWindow, User, UserId, Workspace};
use crate::infrastructure::AppState;

/// Who holds an allotment, as far as the member directory knows them.
/// Only the id is set when the directory entry is gone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupantSummary {
    pub id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllotmentView {
    pub allotted_to: OccupantSummary,
    pub window: LeaseWindow,
}

/// A workspace with its occupant filled in from the directory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceView {
    #[serde(flatten)]
    pub workspace: Workspace,
    pub allotment: Option<AllotmentView>,
}

/// Whether occupant contact numbers are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Hidden,
    Shown,
}

fn summarize(id: &UserId, user: Option<&User>, contact: Contact) -> OccupantSummary {
    OccupantSummary {
        id: id.clone(),
        name: user.map(|u| u.name().to_string()),
        email: user.map(|u| u.email().to_string()),
        organization: user.and_then(|u| u.organization()).map(str::to_string),
        mobile: match contact {
            Contact::Shown => user.and_then(|u| u.mobile()).map(|m| m.to_string()),
            Contact::Hidden => None,
        },
    }
}

/// Joins every occupant in one directory lookup.
pub async fn present(
    state: &AppState,
    workspaces: Vec<Workspace>,
    contact: Contact,
) -> Result<Vec<WorkspaceView>, AppError> {
    let ids: Vec<UserId> = workspaces
        .iter()
        .filter_map(|w| w.allotment.as_ref().map(|a| a.allotted_to.clone()))
        .collect();
    let users = if ids.is_empty() {
        Vec::new()
    } else {
        state.user_repo.find_many(&ids).await?
    };

    Ok(workspaces
        .into_iter()
        .map(|workspace| {
            let allotment = workspace.allotment.as_ref().map(|a| AllotmentView {
                allotted_to: summarize(
                    &a.allotted_to,
                    users.iter().find(|u| u.id() == &a.allotted_to),
                    contact,
                ),
                window: a.window,
            });
            WorkspaceView { workspace, allotment }
        })
        .collect())
}

pub async fn present_one(state: &AppState, workspace: Workspace, contact: Contact) -> Result<WorkspaceView, AppError> {
    let mut views = present(state, vec![workspace], contact).await?;
    views
        .pop()
        .ok_or_else(|| AppError::Internal("workspace vanished while presenting it".to_string()))
}
