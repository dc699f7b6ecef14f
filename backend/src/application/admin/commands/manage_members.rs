use crate::application::access::Caller;
use crate::application::notifications::{send_best_effort, welcome_email};
use crate::application::ports::StoreError;
use crate::application::validation::{field, optional, required};
use crate::application::AppError;
use crate::domain::*;
use crate::infrastructure::AppState;

#[derive(Debug, Clone, Default)]
pub struct MemberCommand {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub organization: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

fn already_exists() -> AppError {
    AppError::Validation("User already exists".to_string())
}

pub(crate) fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

fn parse_role(raw: Option<String>) -> Result<Option<UserRole>, AppError> {
    optional(raw)
        .map(|r| UserRole::parse(&r).ok_or_else(|| AppError::Validation(format!("Unknown role '{r}'"))))
        .transpose()
}

fn parse_status(raw: Option<String>) -> Result<Option<UserStatus>, AppError> {
    optional(raw)
        .map(|s| match s.as_str() {
            "Active" | "Inactive" | "Pending" => Ok(UserStatus::from_db_str(&s)),
            _ => Err(AppError::Validation(format!("Unknown status '{s}'"))),
        })
        .transpose()
}

/// Adds a directory entry and sends a welcome email. The member exists even
/// when the email cannot be delivered.
pub async fn create(state: &AppState, caller: &Caller, cmd: MemberCommand) -> Result<User, AppError> {
    caller.require_admin()?;
    let name = field(DisplayName::new(required("Name", &cmd.name)?))?;
    let email = field(Email::new(required("Email", &cmd.email)?))?;
    let mobile = optional(cmd.mobile).map(ContactNumber::new).transpose().map_err(AppError::Validation)?;
    let role = parse_role(cmd.role)?.unwrap_or(UserRole::Member);

    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(already_exists());
    }
    let user = User::new(name, email, mobile, optional(cmd.organization), role);
    match state.user_repo.save(&user).await {
        Ok(()) => {}
        Err(StoreError::Duplicate(_)) => return Err(already_exists()),
        Err(e) => return Err(e.into()),
    }
    tracing::info!(user = %user.id(), role = user.role().as_str(), by = %caller.email, "member created");

    send_best_effort(&*state.mailer, welcome_email(&user)).await;
    Ok(user)
}

pub async fn list(state: &AppState, caller: &Caller) -> Result<Vec<User>, AppError> {
    caller.require_admin()?;
    Ok(state.user_repo.list().await?)
}

pub async fn update(state: &AppState, caller: &Caller, raw_id: &str, cmd: MemberCommand) -> Result<User, AppError> {
    caller.require_admin()?;
    let id = UserId::parse(raw_id).map_err(|_| user_not_found())?;
    let user = apply_update(state, &id, cmd).await?;
    tracing::info!(user = %id, status = user.status().as_db_str(), by = %caller.email, "member updated");
    Ok(user)
}

/// Validates `cmd`, keeps emails unique across the directory, then writes.
/// Absent fields stay as they are.
pub(crate) async fn apply_update(state: &AppState, id: &UserId, cmd: MemberCommand) -> Result<User, AppError> {
    let mut user = state.user_repo.find_by_id(id).await?.ok_or_else(user_not_found)?;

    let patch = UserPatch {
        name: optional(cmd.name).map(DisplayName::new).transpose().map_err(AppError::Validation)?,
        email: optional(cmd.email).map(Email::new).transpose().map_err(AppError::Validation)?,
        mobile: optional(cmd.mobile).map(ContactNumber::new).transpose().map_err(AppError::Validation)?,
        organization: optional(cmd.organization),
        role: parse_role(cmd.role)?,
        status: parse_status(cmd.status)?,
    };
    if let Some(email) = &patch.email {
        if let Some(holder) = state.user_repo.find_by_email(email).await? {
            if holder.id() != id {
                return Err(already_exists());
            }
        }
    }

    user.apply(patch);
    match state.user_repo.update(&user).await {
        Ok(true) => Ok(user),
        Ok(false) => Err(user_not_found()),
        Err(StoreError::Duplicate(_)) => Err(already_exists()),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete(state: &AppState, caller: &Caller, raw_id: &str) -> Result<(), AppError> {
    caller.require_admin()?;
    let id = UserId::parse(raw_id).map_err(|_| user_not_found())?;
    if !state.user_repo.delete(&id).await? {
        return Err(user_not_found());
    }
    tracing::info!(user = %id, by = %caller.email, "member removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockMailer;
    use crate::test_support::{caller, TestStore};

    fn admin() -> Caller {
        caller("admin@cohort.com", UserRole::Admin)
    }

    fn amit() -> MemberCommand {
        MemberCommand {
            name: Some("Amit Sharma".into()),
            email: Some("Amit@Startup.co".into()),
            mobile: Some("+91 98765 43210".into()),
            organization: Some("Startup Co".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_sends_welcome_and_rejects_duplicates() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|email| email.to.as_str() == "amit@startup.co")
            .times(1)
            .returning(|_| Ok(()));
        let store = TestStore::with_mailer(mailer);

        let user = create(&store.state, &admin(), amit()).await.unwrap();
        assert_eq!(user.role(), UserRole::Member);
        assert_eq!(user.status(), UserStatus::Pending);

        let err = create(&store.state, &admin(), amit()).await.unwrap_err();
        assert_eq!(err.to_string(), "User already exists");
        assert_eq!(list(&store.state, &admin()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_survives_mail_failure() {
        let mut mailer = MockMailer::new();
        mailer.expect_send().returning(|_| Err("smtp down".to_string()));
        let store = TestStore::with_mailer(mailer);

        assert!(create(&store.state, &admin(), amit()).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_checks_shapes() {
        let store = TestStore::new();
        let mut bad_mobile = amit();
        bad_mobile.mobile = Some("12-34".into());
        assert_eq!(create(&store.state, &admin(), bad_mobile).await.unwrap_err().to_string(), "Invalid contact number");

        let mut bad_role = amit();
        bad_role.role = Some("Owner".into());
        assert_eq!(create(&store.state, &admin(), bad_role).await.unwrap_err().to_string(), "Unknown role 'Owner'");

        let mut no_email = amit();
        no_email.email = None;
        assert_eq!(create(&store.state, &admin(), no_email).await.unwrap_err().to_string(), "Email is required");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = TestStore::new();
        let amit = store.member("amit@startup.co", UserRole::Member).await;
        store.member("sneha@designhub.in", UserRole::Member).await;
        let id = amit.id().to_string();

        let updated = update(
            &store.state,
            &admin(),
            &id,
            MemberCommand { status: Some("Active".into()), ..Default::default() },
        )
        .await
        .unwrap();
        assert_eq!(updated.status(), UserStatus::Active);
        assert_eq!(store.state.user_repo.count(Some(UserStatus::Active)).await.unwrap(), 1);

        let taken = update(
            &store.state,
            &admin(),
            &id,
            MemberCommand { email: Some("sneha@designhub.in".into()), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert_eq!(taken.to_string(), "User already exists");

        delete(&store.state, &admin(), &id).await.unwrap();
        let err = delete(&store.state, &admin(), &id).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_directory_is_admin_only() {
        let store = TestStore::new();
        let err = list(&store.state, &caller("m@cohort.com", UserRole::Manager)).await.unwrap_err();
        assert_eq!(err.to_string(), "Not authorized as an admin");
    }
}
