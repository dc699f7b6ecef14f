use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Member,
    Manager,
    Authenticator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Member => "Member",
            UserRole::Manager => "Manager",
            UserRole::Authenticator => "Authenticator",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Admin" => Some(UserRole::Admin),
            "Member" => Some(UserRole::Member),
            "Manager" => Some(UserRole::Manager),
            "Authenticator" => Some(UserRole::Authenticator),
            _ => None,
        }
    }
}
