use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayPassStatus {
    Pending,
    Used,
    Expired,
}

impl DayPassStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            DayPassStatus::Pending => "Pending",
            DayPassStatus::Used => "Used",
            DayPassStatus::Expired => "Expired",
        }
    }

    pub fn from_db_str(raw: &str) -> Self {
        match raw {
            "Used" => DayPassStatus::Used,
            "Expired" => DayPassStatus::Expired,
            _ => DayPassStatus::Pending,
        }
    }
}

/// Why a pass cannot be redeemed right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedeemRefusal {
    AlreadyUsed,
    Expired,
    WrongDay(NaiveDate),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPass {
    pub id: RequestId,
    pub name: DisplayName,
    pub email: Email,
    pub contact: ContactNumber,
    pub purpose: String,
    pub visit_date: DateTime<Utc>,
    pub pass_code: PassCode,
    pub status: DayPassStatus,
    pub created_at: DateTime<Utc>,
}

impl DayPass {
    pub fn issue(
        name: DisplayName,
        email: Email,
        contact: ContactNumber,
        purpose: String,
        visit_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RequestId::new(),
            name,
            email,
            contact,
            purpose,
            visit_date,
            pass_code: PassCode::generate(),
            status: DayPassStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// A pass is good for its visit day (UTC calendar day) and only once.
    pub fn check_redeemable(&self, today: NaiveDate) -> Result<(), RedeemRefusal> {
        match self.status {
            DayPassStatus::Used => Err(RedeemRefusal::AlreadyUsed),
            DayPassStatus::Expired => Err(RedeemRefusal::Expired),
            DayPassStatus::Pending => {
                let valid_on = self.visit_date.date_naive();
                if valid_on == today {
                    Ok(())
                } else {
                    Err(RedeemRefusal::WrongDay(valid_on))
                }
            }
        }
    }
}
