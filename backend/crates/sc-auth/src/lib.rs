pub mod auth_context;
pub mod authenticated_session;
pub mod authorization_gate;
pub mod claims;
pub mod credential_hasher;
pub mod credential_submission;
pub mod error;
pub mod hashing_params;
pub mod identity_resolver;
pub mod session_token_codec;

pub use auth_context::AuthContext;
pub use authenticated_session::AuthenticatedSession;
pub use authorization_gate::{AuthorizationGate, extract_bearer_token};
pub use claims::SessionClaims;
pub use credential_hasher::CredentialHasher;
pub use credential_submission::CredentialSubmission;
pub use error::{AuthError, Result};
pub use hashing_params::HashingParams;
pub use identity_resolver::{IdentityResolver, synthesize_username};
pub use session_token_codec::{IssuedToken, SessionTokenCodec};

/// Prefix of usernames synthesized for externally-created identities
pub const EXTERNAL_USERNAME_PREFIX: &str = "wx_";
/// Number of external-id characters kept in a synthesized username
pub const EXTERNAL_USERNAME_ID_CHARS: usize = 8;

pub const MAX_USERNAME_LENGTH: usize = 64;
pub const MAX_PASSWORD_BYTES: usize = 1024;

#[cfg(test)]
mod tests;
