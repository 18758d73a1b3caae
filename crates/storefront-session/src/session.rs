//! Stored session data structure

use serde::{Deserialize, Serialize};

/// Client-side record of a logged-in user, bearer token included.
///
/// Serialized as-is into the session slot; the shape matches the `user`
/// object the backend returns so a server copy can be stored without
/// remapping.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Backend user id, needed to match the user's own reviews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
    pub name: String,
    /// Opaque bearer credential
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl StoredSession {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            email: email.into(),
            name: name.into(),
            token: token.into(),
            role: None,
            phone: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

// Tokens stay out of logs
impl std::fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredSession")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("token", &if self.has_token() { "<redacted>" } else { "" })
            .field("role", &self.role)
            .field("phone", &self.phone)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let session = StoredSession::new("kim@x.com", "Kim", "tok1");
        assert_eq!(session.bearer(), "Bearer tok1");
        assert!(session.has_token());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = StoredSession::new("kim@x.com", "Kim", "secret-token");
        let printed = format!("{:?}", session);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("kim@x.com"));
    }

    #[test]
    fn test_server_copy_without_token_keeps_its_shape() {
        let session: StoredSession =
            serde_json::from_str(r#"{"name":"Kim","email":"kim@x.com","id":7}"#).unwrap();
        assert_eq!(session.name, "Kim");
        assert_eq!(session.id, Some(7));
        assert!(!session.has_token());

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 7, "email": "kim@x.com", "name": "Kim"})
        );
    }

    #[test]
    fn test_optional_fields() {
        let session = StoredSession::new("a@b.c", "A", "t")
            .with_phone("010-0000-0000")
            .with_role("ADMIN")
            .with_id(3);
        let json = serde_json::to_string(&session).unwrap();
        let back: StoredSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
