use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier for a role as reported by the backend.
///
/// The roles endpoint historically returned bare name strings with no id at
/// all. Those entries get a positional `Synthetic` id of `index + 1`, which is
/// not stable across refetches: a reordered response assigns different ids to
/// the same names. Synthetic ids must never be persisted or compared across
/// requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleId {
    Assigned(i64),
    Synthetic(i64),
}

impl RoleId {
    pub fn value(&self) -> i64 {
        match self {
            Self::Assigned(id) | Self::Synthetic(id) => *id,
        }
    }

    /// Whether the id came from the server and is safe to reuse later.
    pub fn is_durable(&self) -> bool {
        matches!(self, Self::Assigned(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

impl Role {
    /// Normalize one raw entry from the roles endpoint.
    ///
    /// Entries are either bare name strings or objects carrying
    /// `role_name`/`name` and `role_id`/`id`. `index` feeds the synthetic id
    /// fallback for entries that arrive without a server id.
    pub fn from_raw(index: usize, raw: &Value) -> Option<Self> {
        let synthetic = RoleId::Synthetic(index as i64 + 1);

        if let Some(name) = raw.as_str() {
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            return Some(Self { id: synthetic, name: name.to_owned() });
        }

        let object = raw.as_object()?;
        let name = object
            .get("role_name")
            .or_else(|| object.get("name"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())?;

        let id = object
            .get("role_id")
            .or_else(|| object.get("id"))
            .and_then(numeric_id)
            .map(RoleId::Assigned)
            .unwrap_or(synthetic);

        Some(Self { id, name: name.to_owned() })
    }
}

fn numeric_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}
