//! User identity - the durable record both login paths resolve to.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A user identity as persisted by the identity store.
///
/// `id` is assigned by the store on creation and never changes. Identities
/// created through an external provider carry an `external_id` and no
/// `password_hash`; they cannot be used with local login.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// PHC-format digest, `None` for externally-authenticated identities
    pub password_hash: Option<String>,
    pub email: Option<String>,
    /// External provider account id (e.g. WeChat open id)
    pub external_id: Option<String>,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this identity is linked to an external provider account
    pub fn is_external(&self) -> bool {
        self.external_id.is_some()
    }

    /// Check if this identity can authenticate with a local password
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| "<redacted>"),
            )
            .field("email", &self.email)
            .field("external_id", &self.external_id)
            .field("display_name", &self.display_name)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
