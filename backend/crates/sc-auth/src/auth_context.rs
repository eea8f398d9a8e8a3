use uuid::Uuid;

/// Identity attached to a request once its bearer token has been validated.
///
/// Built from the token alone; the identity store is not consulted, so
/// profile fields may be stale relative to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub identity_id: Uuid,
}

impl AuthContext {
    pub fn new(identity_id: Uuid) -> Self {
        Self { identity_id }
    }
}
