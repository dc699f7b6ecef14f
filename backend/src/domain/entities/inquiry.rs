use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InquiryStatus {
    Pending,
    Reviewed,
    Completed,
}

impl InquiryStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            InquiryStatus::Pending => "Pending",
            InquiryStatus::Reviewed => "Reviewed",
            InquiryStatus::Completed => "Completed",
        }
    }

    pub fn from_db_str(raw: &str) -> Self {
        match raw {
            "Reviewed" => InquiryStatus::Reviewed,
            "Completed" => InquiryStatus::Completed,
            _ => InquiryStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl VisitStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            VisitStatus::Pending => "Pending",
            VisitStatus::Confirmed => "Confirmed",
            VisitStatus::Completed => "Completed",
            VisitStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_db_str(raw: &str) -> Self {
        match raw {
            "Confirmed" => VisitStatus::Confirmed,
            "Completed" => VisitStatus::Completed,
            "Cancelled" => VisitStatus::Cancelled,
            _ => VisitStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub id: RequestId,
    pub full_name: DisplayName,
    pub work_email: Email,
    pub contact_number: ContactNumber,
    pub firm_name: String,
    pub firm_type: String,
    pub required_workspace: String,
    pub capacity: u32,
    pub start_date: DateTime<Utc>,
    pub duration: String,
    pub additional_requirements: Option<String>,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub id: RequestId,
    pub name: DisplayName,
    pub email: Email,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRequest {
    pub id: RequestId,
    pub workspace_id: WorkspaceId,
    pub workspace_name: String,
    pub full_name: DisplayName,
    pub email: Email,
    pub contact_number: ContactNumber,
    pub visit_date: DateTime<Utc>,
    pub status: VisitStatus,
    pub created_at: DateTime<Utc>,
}
