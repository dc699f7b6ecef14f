use chrono::Utc;

use crate::application::access::Caller;
use crate::application::ports::AllotOutcome;
use crate::application::validation::{field, optional, parse_date, required};
use crate::application::AppError;
use crate::domain::*;
use crate::infrastructure::AppState;

/// Catalogue fields as submitted. On update, absent fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceCommand {
    pub name: Option<String>,
    pub location: Option<String>,
    pub floor: Option<String>,
    pub kind: Option<String>,
    pub capacity: Option<String>,
    pub base_price: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub featured: Option<bool>,
    pub features: Option<WorkspaceFeatures>,
}

impl WorkspaceCommand {
    fn overlay(self, mut details: WorkspaceDetails) -> WorkspaceDetails {
        if let Some(name) = self.name {
            details.name = name;
        }
        if let Some(location) = self.location {
            details.location = location;
        }
        if self.floor.is_some() {
            details.floor = optional(self.floor);
        }
        if let Some(kind) = self.kind {
            details.kind = kind;
        }
        if let Some(capacity) = self.capacity {
            details.capacity = capacity;
        }
        if let Some(price) = self.base_price {
            details.base_price = price;
        }
        if let Some(amenities) = self.amenities {
            details.amenities = amenities;
        }
        if self.image_url.is_some() {
            details.image_url = optional(self.image_url);
        }
        if let Some(featured) = self.featured {
            details.featured = featured;
        }
        if let Some(features) = self.features {
            details.features = features;
        }
        details
    }
}

#[derive(Debug, Clone, Default)]
pub struct AllotCommand {
    pub user_id: Option<String>,
    pub start_date: Option<String>,
    pub duration: Option<String>,
}

fn not_found() -> AppError {
    AppError::NotFound("Workspace not found".to_string())
}

fn parse_id(raw: &str) -> Result<WorkspaceId, AppError> {
    WorkspaceId::parse(raw).map_err(|_| not_found())
}

pub async fn create(state: &AppState, caller: &Caller, cmd: WorkspaceCommand) -> Result<Workspace, AppError> {
    caller.require_admin()?;
    let base_price = cmd
        .base_price
        .ok_or_else(|| AppError::Validation("Base price is required".to_string()))?;
    let details = cmd.overlay(WorkspaceDetails {
        name: String::new(),
        location: String::new(),
        floor: None,
        kind: String::new(),
        capacity: String::new(),
        base_price,
        amenities: Vec::new(),
        image_url: None,
        featured: false,
        features: WorkspaceFeatures::default(),
    });
    let workspace = field(Workspace::create(details))?;
    state.workspace_repo.save(&workspace).await?;
    tracing::info!(workspace = %workspace.id, name = %workspace.name, "workspace created");
    Ok(workspace)
}

pub async fn update(
    state: &AppState,
    caller: &Caller,
    raw_id: &str,
    cmd: WorkspaceCommand,
) -> Result<Workspace, AppError> {
    caller.require_admin()?;
    let id = parse_id(raw_id)?;
    let current = state.workspace_repo.find_by_id(&id).await?.ok_or_else(not_found)?;

    let details = cmd.overlay(current.details());
    field(details.validate())?;
    let updated = state
        .workspace_repo
        .update_details(&id, &details)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(workspace = %id, "workspace updated");
    Ok(updated)
}

pub async fn delete(state: &AppState, caller: &Caller, raw_id: &str) -> Result<(), AppError> {
    caller.require_admin()?;
    let id = parse_id(raw_id)?;
    if !state.workspace_repo.delete(&id).await? {
        return Err(not_found());
    }
    tracing::info!(workspace = %id, "workspace removed");
    Ok(())
}

/// Manual allotment through the same guarded write the booking flow uses.
pub async fn allot(
    state: &AppState,
    caller: &Caller,
    raw_id: &str,
    cmd: AllotCommand,
) -> Result<Workspace, AppError> {
    caller.require_admin()?;
    let id = parse_id(raw_id)?;
    let user_id = field(UserId::parse(required("User id", &cmd.user_id)?))?;
    let start = parse_date("Start date", required("Start date", &cmd.start_date)?)?;
    let duration = field(DurationSpec::parse(required("Duration", &cmd.duration)?))?;
    let window = field(LeaseWindow::starting_at(start, &duration))?;

    if state.user_repo.find_by_id(&user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let allotment = Allotment { allotted_to: user_id, window };
    match state.workspace_repo.try_allot(&id, &allotment, Utc::now()).await? {
        AllotOutcome::Allotted(workspace) => {
            tracing::info!(
                workspace = %id,
                occupant = %allotment.allotted_to,
                until = %window.end,
                by = %caller.email,
                "workspace allotted manually"
            );
            Ok(workspace)
        }
        AllotOutcome::Occupied(current) => Err(AppError::AlreadyAllotted(format!(
            "Workspace is already allotted until {}",
            current.window.end.format("%Y-%m-%d")
        ))),
        AllotOutcome::Missing => Err(not_found()),
    }
}

pub async fn release(state: &AppState, caller: &Caller, raw_id: &str) -> Result<Workspace, AppError> {
    caller.require_admin()?;
    let id = parse_id(raw_id)?;
    if state.workspace_repo.release(&id, None).await? {
        tracing::info!(workspace = %id, by = %caller.email, "allotment released");
    }
    state.workspace_repo.find_by_id(&id).await?.ok_or_else(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{caller, TestStore};

    fn admin() -> Caller {
        caller("admin@cohort.com", UserRole::Admin)
    }

    fn suite() -> WorkspaceCommand {
        WorkspaceCommand {
            name: Some("Private Suite".into()),
            location: Some("Whitefields, Kondapur".into()),
            floor: Some("2nd Floor".into()),
            kind: Some("Private Office".into()),
            capacity: Some("8 people".into()),
            base_price: Some(24_999.0),
            amenities: Some(vec!["Air conditioning".into()]),
            featured: Some(true),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_validates_catalogue_fields() {
        let store = TestStore::new();

        let created = create(&store.state, &admin(), suite()).await.unwrap();
        assert!(created.allotment.is_none());

        let mut nameless = suite();
        nameless.name = Some("  ".into());
        assert_eq!(create(&store.state, &admin(), nameless).await.unwrap_err().to_string(), "Name is required");

        let mut negative = suite();
        negative.base_price = Some(-1.0);
        assert!(matches!(create(&store.state, &admin(), negative).await, Err(AppError::Validation(_))));

        let member = caller("amit@startup.co", UserRole::Member);
        assert!(matches!(create(&store.state, &member, suite()).await, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_allotment_and_absent_fields() {
        let store = TestStore::new();
        let member = store.member("amit@startup.co", UserRole::Member).await;
        let created = create(&store.state, &admin(), suite()).await.unwrap();
        let id = created.id.to_string();
        allot(
            &store.state,
            &admin(),
            &id,
            AllotCommand {
                user_id: Some(member.id().to_string()),
                start_date: Some(Utc::now().to_rfc3339()),
                duration: Some("6 months".into()),
            },
        )
        .await
        .unwrap();

        let updated = update(
            &store.state,
            &admin(),
            &id,
            WorkspaceCommand { base_price: Some(19_999.0), ..Default::default() },
        )
        .await
        .unwrap();

        assert_eq!(updated.base_price, 19_999.0);
        assert_eq!(updated.name, "Private Suite");
        assert_eq!(updated.allotment.map(|a| a.allotted_to), Some(member.id().clone()));
    }

    #[tokio::test]
    async fn test_manual_allotment_respects_running_lease() {
        let store = TestStore::new();
        let first = store.member("amit@startup.co", UserRole::Member).await;
        let second = store.member("sneha@designhub.in", UserRole::Member).await;
        let workspace = store.workspace("Private Suite", 100.0).await;
        let id = workspace.id.to_string();
        let cmd = |user: &User| AllotCommand {
            user_id: Some(user.id().to_string()),
            start_date: Some(Utc::now().to_rfc3339()),
            duration: Some("1 month".into()),
        };

        allot(&store.state, &admin(), &id, cmd(&first)).await.unwrap();
        let err = allot(&store.state, &admin(), &id, cmd(&second)).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyAllotted(_)));

        let released = release(&store.state, &admin(), &id).await.unwrap();
        assert!(released.allotment.is_none());
        let taken = allot(&store.state, &admin(), &id, cmd(&second)).await.unwrap();
        assert_eq!(taken.allotment.unwrap().allotted_to, *second.id());
    }

    #[tokio::test]
    async fn test_allotment_needs_a_known_member() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 100.0).await;

        let err = allot(
            &store.state,
            &admin(),
            &workspace.id.to_string(),
            AllotCommand {
                user_id: Some(UserId::new().to_string()),
                start_date: Some(crate::test_support::today()),
                duration: Some("1 year".into()),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_delete_unknown_workspace() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 100.0).await;

        delete(&store.state, &admin(), &workspace.id.to_string()).await.unwrap();
        let err = delete(&store.state, &admin(), &workspace.id.to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
