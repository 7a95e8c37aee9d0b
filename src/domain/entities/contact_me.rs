use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw contact form as posted by the site. Absent and `null` fields both
/// deserialize to `None` so presence is judged by validation, not by serde.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl ContactForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        ContactForm {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }
}

/// Fields that passed validation, already trimmed, escaped and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Where a submission came from.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestMeta {
    pub source_address: Option<String>,
    pub client_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageInsert {
    pub name: String,
    pub email: String,
    pub message: String,
    pub source_address: Option<String>,
    pub client_agent: String,
}

impl ContactMessageInsert {
    pub fn new(contact: SanitizedContact, meta: RequestMeta) -> Self {
        ContactMessageInsert {
            name: contact.name,
            email: contact.email,
            message: contact.message,
            source_address: meta.source_address,
            client_agent: meta.client_agent,
        }
    }
}

/// A stored submission. Timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub source_address: Option<String>,
    pub client_agent: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_fields_deserialize_as_none() {
        let form: ContactForm =
            serde_json::from_str(r#"{"name": null, "message": "hi"}"#).unwrap();

        assert_eq!(form.name, None);
        assert_eq!(form.email, None);
        assert_eq!(form.message.as_deref(), Some("hi"));
    }
}
