use serde::Serialize;

use crate::application::ports::{StoreResult, UserRepository};
use crate::application::AppError;
use crate::domain::value_objects::{Email, UserId, UserRole};

/// The verified identity attached to a request by the auth extractor.
#[derive(Debug, Clone, Serialize)]
pub struct Caller {
    pub id: UserId,
    pub email: Email,
    pub role: UserRole,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn require_any(&self, roles: &[UserRole]) -> Result<(), AppError> {
        if roles.contains(&self.role) {
            return Ok(());
        }
        Err(AppError::Forbidden(format!(
            "Role {} is not authorized to access this route",
            self.role.as_str()
        )))
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            return Ok(());
        }
        Err(AppError::Forbidden("Not authorized as an admin".to_string()))
    }
}

/// Which customer records a caller may read. Bookings and invoices both
/// filter through this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordScope {
    All,
    Own(Email),
}

impl RecordScope {
    pub fn for_caller(caller: &Caller) -> Self {
        if caller.is_admin() {
            RecordScope::All
        } else {
            RecordScope::Own(caller.email.clone())
        }
    }

    pub fn admits(&self, email: &Email) -> bool {
        match self {
            RecordScope::All => true,
            RecordScope::Own(own) => own == email,
        }
    }
}

/// Session identity wins; otherwise look the submitted email up in the
/// member directory. `None` when neither resolves.
pub async fn resolve_identity(
    users: &dyn UserRepository,
    session: Option<&UserId>,
    email: &Email,
) -> StoreResult<Option<UserId>> {
    if let Some(id) = session {
        return Ok(Some(id.clone()));
    }
    Ok(users.find_by_email(email).await?.map(|user| user.id().clone()))
}
