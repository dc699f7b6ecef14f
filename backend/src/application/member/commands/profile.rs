use crate::application::access::Caller;
use crate::application::admin::commands::manage_members::{apply_update, user_not_found, MemberCommand};
use crate::application::AppError;
use crate::domain::User;
use crate::infrastructure::AppState;

/// Self-service edits. Role and status stay with the administrators;
/// passwords live with the identity provider.
#[derive(Debug, Clone, Default)]
pub struct ProfileCommand {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub organization: Option<String>,
}

pub async fn show(state: &AppState, caller: &Caller) -> Result<User, AppError> {
    state.user_repo.find_by_id(&caller.id).await?.ok_or_else(user_not_found)
}

pub async fn update(state: &AppState, caller: &Caller, cmd: ProfileCommand) -> Result<User, AppError> {
    let user = apply_update(
        state,
        &caller.id,
        MemberCommand {
            name: cmd.name,
            email: cmd.email,
            mobile: cmd.mobile,
            organization: cmd.organization,
            role: None,
            status: None,
        },
    )
    .await?;
    tracing::info!(user = %caller.id, "profile updated");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::test_support::{caller, caller_for, TestStore};

    #[tokio::test]
    async fn test_show_returns_own_entry() {
        let store = TestStore::new();
        let amit = store.member("amit@startup.co", UserRole::Member).await;

        let me = show(&store.state, &caller_for(&amit)).await.unwrap();
        assert_eq!(me.id(), amit.id());

        let err = show(&store.state, &caller("ghost@cohort.com", UserRole::Member)).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_update_changes_contact_details_only() {
        let store = TestStore::new();
        let amit = store.member("amit@startup.co", UserRole::Member).await;
        let me = caller_for(&amit);

        let updated = update(
            &store.state,
            &me,
            ProfileCommand {
                name: Some("Amit Sharma".into()),
                mobile: Some("+91 98765 43210".into()),
                organization: Some("Startup Co".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name().as_str(), "Amit Sharma");
        assert_eq!(updated.organization(), Some("Startup Co"));
        assert_eq!(updated.role(), UserRole::Member);
        assert_eq!(updated.status(), amit.status());
        let stored = store.state.user_repo.find_by_id(amit.id()).await.unwrap().unwrap();
        assert_eq!(stored.name().as_str(), "Amit Sharma");
    }

    #[tokio::test]
    async fn test_update_applies_directory_checks() {
        let store = TestStore::new();
        let amit = store.member("amit@startup.co", UserRole::Member).await;
        store.member("sneha@designhub.in", UserRole::Member).await;
        let me = caller_for(&amit);

        let taken = update(
            &store.state,
            &me,
            ProfileCommand { email: Some("sneha@designhub.in".into()), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert_eq!(taken.to_string(), "User already exists");

        let bad = update(&store.state, &me, ProfileCommand { mobile: Some("12-34".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(bad.to_string(), "Invalid contact number");

        let err = update(&store.state, &caller("ghost@cohort.com", UserRole::Member), ProfileCommand::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }
}
