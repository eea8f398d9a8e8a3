use chrono::{DateTime, Utc};

/// Insert payload for a user identity. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub external_id: Option<String>,
    pub display_name: Option<String>,
    /// Used for both `created_at` and `updated_at` of the stored record
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Identity registered with a username and password
    pub fn local(username: String, password_hash: String, email: Option<String>) -> Self {
        Self {
            username,
            password_hash: Some(password_hash),
            email,
            external_id: None,
            display_name: None,
            created_at: Utc::now(),
        }
    }

    /// Identity created on first login through an external provider
    pub fn external(username: String, external_id: String, display_name: String) -> Self {
        Self {
            username,
            password_hash: None,
            email: None,
            external_id: Some(external_id),
            display_name: Some(display_name),
            created_at: Utc::now(),
        }
    }
}
