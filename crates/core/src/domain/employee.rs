use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_ROLE: &str = "General Employee";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub joining_date: Option<NaiveDate>,
    /// Canonical display role, derived from whichever shape the record used.
    pub primary_role: String,
    /// Every role string the record carries. Falls back to a singleton of
    /// `primary_role` when the source had no multi-role field.
    pub roles: Vec<String>,
}

/// Payload for employee create/update calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Employee {
    /// Normalize one raw employee record.
    ///
    /// The backend has shipped several shapes over time; the role derivation
    /// order is fixed and first match wins:
    /// `roles[0].role_name` → `roles[0]` (string form) → `role` → `role_name`
    /// → `designation` → `"General Employee"`.
    pub fn from_raw(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;
        let id = object.get("id").or_else(|| object.get("employee_id")).and_then(numeric_id)?;

        let (first_name, last_name) = derive_name(object)?;
        let primary_role = derive_primary_role(object);
        let roles = derive_role_list(object, &primary_role);

        Some(Self {
            id,
            first_name,
            last_name,
            email: string_field(object, "email"),
            mobile: string_field(object, "mobile"),
            address: string_field(object, "address"),
            joining_date: object
                .get("joining_date")
                .and_then(Value::as_str)
                .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()),
            primary_role,
            roles,
        })
    }

    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

fn derive_name(object: &serde_json::Map<String, Value>) -> Option<(String, String)> {
    let first = string_field(object, "first_name");
    let last = string_field(object, "last_name");
    if first.is_some() || last.is_some() {
        return Some((first.unwrap_or_default(), last.unwrap_or_default()));
    }

    // Older records carry a single `name`; split on the first space.
    let name = string_field(object, "name")?;
    match name.split_once(' ') {
        Some((first, last)) => Some((first.to_owned(), last.trim().to_owned())),
        None => Some((name, String::new())),
    }
}

fn derive_primary_role(object: &serde_json::Map<String, Value>) -> String {
    if let Some(entries) = object.get("roles").and_then(Value::as_array) {
        if let Some(first) = entries.first() {
            if let Some(name) =
                first.get("role_name").and_then(Value::as_str).map(str::trim).filter(|n| !n.is_empty())
            {
                return name.to_owned();
            }
            if let Some(name) = first.as_str().map(str::trim).filter(|n| !n.is_empty()) {
                return name.to_owned();
            }
        }
    }

    for key in ["role", "role_name", "designation"] {
        if let Some(name) = string_field(object, key) {
            return name;
        }
    }

    DEFAULT_ROLE.to_owned()
}

fn derive_role_list(object: &serde_json::Map<String, Value>, primary_role: &str) -> Vec<String> {
    let entries = object.get("roles").and_then(Value::as_array);
    let names: Vec<String> = entries
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    entry
                        .get("role_name")
                        .and_then(Value::as_str)
                        .or_else(|| entry.as_str())
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_owned)
                })
                .collect()
        })
        .unwrap_or_default();

    if names.is_empty() {
        vec![primary_role.to_owned()]
    } else {
        names
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
