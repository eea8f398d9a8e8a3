use sc_core::User;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Successful outcome of any identity resolution
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedSession {
    pub fn identity_id(&self) -> Uuid {
        self.user.id
    }
}
