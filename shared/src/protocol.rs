use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Body of responses that only confirm an action, e.g. a deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub firm_name: Option<String>,
    pub duration: Option<String>,
    pub start_date: Option<String>,
    pub workspace_id: Option<String>,
    pub workspace_name: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingStatusUpdate {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceFeaturesPayload {
    #[serde(default)]
    pub has_conference_hall: bool,
    #[serde(default)]
    pub has_cabin: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspacePayload {
    pub name: Option<String>,
    pub location: Option<String>,
    pub floor: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub capacity: Option<String>,
    pub base_price: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub featured: Option<bool>,
    pub features: Option<WorkspaceFeaturesPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllotmentPayload {
    pub user_id: Option<String>,
    pub start_date: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub organization: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// What a signed-in user may change about themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub organization: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSubmission {
    pub full_name: Option<String>,
    pub work_email: Option<String>,
    pub contact_number: Option<String>,
    pub firm_name: Option<String>,
    pub firm_type: Option<String>,
    pub required_workspace: Option<String>,
    pub capacity: Option<i64>,
    pub start_date: Option<String>,
    pub duration: Option<String>,
    pub additional_requirements: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitSubmission {
    pub workspace_id: Option<String>,
    pub workspace_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub visit_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPassApplication {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub purpose: Option<String>,
    pub visit_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceQuery {
    pub location: Option<String>,
}
