use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceFeatures {
    pub has_conference_hall: bool,
    pub has_cabin: bool,
}

/// Who occupies a workspace and for how long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allotment {
    pub allotted_to: UserId,
    pub window: LeaseWindow,
}

impl Allotment {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.window.has_lapsed(now)
    }
}

/// The administrator-editable description of a workspace. Never carries the
/// allotment; that only changes through the guarded allot/release operations.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceDetails {
    pub name: String,
    pub location: String,
    pub floor: Option<String>,
    pub kind: String,
    pub capacity: String,
    pub base_price: f64,
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub features: WorkspaceFeatures,
}

impl WorkspaceDetails {
    pub fn validate(&self) -> Result<(), String> {
        for (label, value) in [
            ("Name", &self.name),
            ("Location", &self.location),
            ("Type", &self.kind),
            ("Capacity", &self.capacity),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{label} is required"));
            }
        }
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err("Base price must be a non-negative number".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub location: String,
    pub floor: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub capacity: String,
    pub base_price: f64,
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub features: WorkspaceFeatures,
    /// Served through a view that names the occupant.
    #[serde(skip_serializing)]
    pub allotment: Option<Allotment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    pub fn create(details: WorkspaceDetails) -> Result<Self, String> {
        details.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: WorkspaceId::new(),
            name: details.name.trim().to_string(),
            location: details.location.trim().to_string(),
            floor: details.floor,
            kind: details.kind.trim().to_string(),
            capacity: details.capacity.trim().to_string(),
            base_price: details.base_price,
            amenities: details.amenities,
            image_url: details.image_url,
            featured: details.featured,
            features: details.features,
            allotment: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply_details(&mut self, details: WorkspaceDetails) -> Result<(), String> {
        details.validate()?;
        self.name = details.name.trim().to_string();
        self.location = details.location.trim().to_string();
        self.floor = details.floor;
        self.kind = details.kind.trim().to_string();
        self.capacity = details.capacity.trim().to_string();
        self.base_price = details.base_price;
        self.amenities = details.amenities;
        self.image_url = details.image_url;
        self.featured = details.featured;
        self.features = details.features;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn details(&self) -> WorkspaceDetails {
        WorkspaceDetails {
            name: self.name.clone(),
            location: self.location.clone(),
            floor: self.floor.clone(),
            kind: self.kind.clone(),
            capacity: self.capacity.clone(),
            base_price: self.base_price,
            amenities: self.amenities.clone(),
            image_url: self.image_url.clone(),
            featured: self.featured,
            features: self.features,
        }
    }

    /// The occupant whose allotment is still running at `now`, if any.
    pub fn active_occupant(&self, now: DateTime<Utc>) -> Option<&UserId> {
        self.allotment
            .as_ref()
            .filter(|a| a.is_active(now))
            .map(|a| &a.allotted_to)
    }

    /// The compare half of the allotment compare-and-swap.
    pub fn can_be_allotted(&self, now: DateTime<Utc>) -> bool {
        self.active_occupant(now).is_none()
    }
}
