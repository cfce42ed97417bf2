use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Job application / supplier partnership request from the contacts endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

impl Contact {
    pub fn from_raw(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;
        let id = match object.get("id")? {
            Value::Number(number) => number.as_i64()?,
            Value::String(text) => text.trim().parse().ok()?,
            _ => return None,
        };
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())?
            .to_owned();

        let field = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };

        Some(Self {
            id,
            name,
            email: field("email"),
            mobile: field("mobile"),
            company: field("company"),
            message: field("message"),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Contact;

    #[test]
    fn normalizes_a_partnership_request() {
        let contact = Contact::from_raw(&json!({
            "id": 3,
            "name": "Surya Components",
            "company": "Surya Components Pvt Ltd",
            "email": "sales@surya.example",
            "message": "Supplier partnership enquiry",
        }))
        .expect("contact");

        assert_eq!(contact.id, 3);
        assert_eq!(contact.company.as_deref(), Some("Surya Components Pvt Ltd"));
        assert!(contact.mobile.is_none());
    }

    #[test]
    fn requires_id_and_name() {
        assert!(Contact::from_raw(&json!({"name": "No Id"})).is_none());
        assert!(Contact::from_raw(&json!({"id": 1, "name": "  "})).is_none());
    }
}
