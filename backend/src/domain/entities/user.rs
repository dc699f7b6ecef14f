use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::*;

/// A directory entry for someone known to the operator. Tokens are issued by
/// the identity provider; this record only backs identity lookups.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: DisplayName,
    email: Email,
    mobile: Option<ContactNumber>,
    organization: Option<String>,
    role: UserRole,
    status: UserStatus,
    joined_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: DisplayName,
        email: Email,
        mobile: Option<ContactNumber>,
        organization: Option<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: UserId::new(),
            name,
            email,
            mobile,
            organization,
            role,
            status: UserStatus::Pending,
            joined_at: Utc::now(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: UserId,
        name: DisplayName,
        email: Email,
        mobile: Option<ContactNumber>,
        organization: Option<String>,
        role: UserRole,
        status: UserStatus,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            mobile,
            organization,
            role,
            status,
            joined_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn mobile(&self) -> Option<&ContactNumber> {
        self.mobile.as_ref()
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Overwrites whichever fields the patch carries.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(mobile) = patch.mobile {
            self.mobile = Some(mobile);
        }
        if let Some(organization) = patch.organization {
            self.organization = Some(organization);
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<DisplayName>,
    pub email: Option<Email>,
    pub mobile: Option<ContactNumber>,
    pub organization: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_members_start_pending() {
        let user = User::new(
            DisplayName::new("Amit Sharma").unwrap(),
            Email::new("amit@startup.co").unwrap(),
            None,
            None,
            UserRole::Member,
        );
        assert_eq!(user.status(), UserStatus::Pending);
    }

    #[test]
    fn test_patch_leaves_absent_fields_alone() {
        let mut user = User::new(
            DisplayName::new("Amit Sharma").unwrap(),
            Email::new("amit@startup.co").unwrap(),
            None,
            Some("Startup Co".to_string()),
            UserRole::Member,
        );
        user.apply(UserPatch {
            status: Some(UserStatus::Active),
            role: Some(UserRole::Manager),
            ..Default::default()
        });
        assert_eq!(user.status(), UserStatus::Active);
        assert_eq!(user.role(), UserRole::Manager);
        assert_eq!(user.organization(), Some("Startup Co"));
        assert_eq!(user.email().as_str(), "amit@startup.co");
    }
}
