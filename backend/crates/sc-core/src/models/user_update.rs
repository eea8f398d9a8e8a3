use chrono::{DateTime, Utc};

/// Partial update for a user identity.
///
/// `None` fields are left untouched by the store. `updated_at` is always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl UserUpdate {
    pub fn new() -> Self {
        Self {
            display_name: None,
            email: None,
            password_hash: None,
            updated_at: Utc::now(),
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

impl Default for UserUpdate {
    fn default() -> Self {
        Self::new()
    }
}
