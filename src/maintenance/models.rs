use crate::{
    models::{lenient_date, lenient_number, Identified, Linked},
    properties::models::PropertyRef,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Emergency,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Self::Low, Self::Medium, Self::High, Self::Emergency];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Emergency => "emergency",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Emergency => "Emergency",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == raw.trim())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub const ALL: [MaintenanceStatus; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw.trim())
    }
}

impl Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: MaintenanceStatus,
    #[serde(default)]
    pub property: Option<Linked<PropertyRef>>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for MaintenanceRequest {
    fn id(&self) -> &str {
        &self.id
    }
}

impl MaintenanceRequest {
    pub fn property_name(&self) -> Option<&str> {
        self.property
            .as_ref()
            .and_then(Linked::populated)
            .map(|p| p.name.as_str())
            .filter(|n| !n.trim().is_empty())
    }
}

/// `/maintenance/my-stats`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceStats {
    #[serde(deserialize_with = "lenient_number")]
    pub total: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub pending: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub in_progress: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub completed: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RequestForm {
    pub title: String,
    pub description: String,
    pub priority: String,
}

/// Body of `POST /maintenance`. The backend attaches the tenant's property.
#[derive(Debug, PartialEq, Serialize)]
pub struct RequestDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusForm {
    pub status: String,
}

/// Body of `PUT /maintenance/:id`.
#[derive(Debug, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: MaintenanceStatus,
}

pub const REQUIRED_FIELDS: &str = "Please fill all required fields";
pub const INVALID_STATUS: &str =
    "Status must be one of: pending, in-progress, completed, cancelled";

impl RequestForm {
    pub fn validate(&self) -> Result<RequestDraft, &'static str> {
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(REQUIRED_FIELDS);
        }
        Ok(RequestDraft {
            title: title.to_string(),
            description: description.to_string(),
            priority: Priority::parse(&self.priority).ok_or(REQUIRED_FIELDS)?,
        })
    }
}

impl StatusForm {
    pub fn validate(&self) -> Result<StatusUpdate, &'static str> {
        MaintenanceStatus::parse(&self.status)
            .map(|status| StatusUpdate { status })
            .ok_or(INVALID_STATUS)
    }
}
