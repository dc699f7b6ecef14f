use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Pending => "Pending",
        }
    }

    pub fn from_db_str(raw: &str) -> Self {
        match raw {
            "Active" => UserStatus::Active,
            "Inactive" => UserStatus::Inactive,
            _ => UserStatus::Pending,
        }
    }
}
