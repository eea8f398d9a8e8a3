use crate::UserDto;

use sc_auth::AuthenticatedSession;

use serde::Serialize;

/// Returned by every login path
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    /// Unix seconds
    pub expires_at: i64,
    pub user: UserDto,
}

impl From<AuthenticatedSession> for SessionResponse {
    fn from(session: AuthenticatedSession) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at.timestamp(),
            user: session.user.into(),
        }
    }
}
