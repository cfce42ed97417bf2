use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    Assigned,
    Scheduled,
    Completed,
}

impl LeadStatus {
    /// Parse the backend's free-form status strings. Unknown or missing
    /// values fall back to `New`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
            Some("assigned") => Self::Assigned,
            Some("scheduled") => Self::Scheduled,
            Some("completed") => Self::Completed,
            _ => Self::New,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub status: LeadStatus,
    pub assigned_to: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
}

/// Payload for the public enquiry form (`POST /api/leads`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EnquiryDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Lead {
    pub fn from_raw(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;
        let id = object.get("id").or_else(|| object.get("lead_id")).and_then(numeric_id)?;

        Some(Self {
            id,
            status: LeadStatus::parse(object.get("status").and_then(Value::as_str)),
            assigned_to: object
                .get("assignedTo")
                .or_else(|| object.get("assigned_to"))
                .and_then(numeric_id),
            name: string_field(object, "name"),
            email: string_field(object, "email"),
            mobile: string_field(object, "mobile"),
        })
    }

    pub fn can_transition_to(&self, next: LeadStatus) -> bool {
        matches!(
            (self.status, next),
            (LeadStatus::New, LeadStatus::Assigned)
                // Reassignment keeps the lead in the assigned bucket.
                | (LeadStatus::Assigned, LeadStatus::Assigned)
                | (LeadStatus::Assigned, LeadStatus::Scheduled)
                | (LeadStatus::Scheduled, LeadStatus::Completed)
        )
    }

    pub fn transition_to(&mut self, next: LeadStatus) -> Result<(), DomainError> {
        if self.can_transition_to(next) {
            self.status = next;
            return Ok(());
        }

        Err(DomainError::InvalidLeadTransition { from: self.status, to: next })
    }
}

fn string_field(object: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn numeric_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}
