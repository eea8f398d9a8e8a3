/// A set of credentials presented to the [`IdentityResolver`](crate::IdentityResolver).
#[derive(Clone)]
pub enum CredentialSubmission {
    /// Create a new local identity
    LocalRegistration {
        username: String,
        password: String,
        email: Option<String>,
    },
    /// Authenticate an existing local identity
    LocalLogin { username: String, password: String },
    /// Completed external provider handshake (code already exchanged)
    External {
        external_id: String,
        display_name: String,
    },
}

impl CredentialSubmission {
    /// Short label for logging; never includes secrets
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LocalRegistration { .. } => "local_registration",
            Self::LocalLogin { .. } => "local_login",
            Self::External { .. } => "external",
        }
    }
}

impl std::fmt::Debug for CredentialSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocalRegistration {
                username, email, ..
            } => f
                .debug_struct("LocalRegistration")
                .field("username", username)
                .field("email", email)
                .finish_non_exhaustive(),
            Self::LocalLogin { username, .. } => f
                .debug_struct("LocalLogin")
                .field("username", username)
                .finish_non_exhaustive(),
            Self::External {
                external_id,
                display_name,
            } => f
                .debug_struct("External")
                .field("external_id", external_id)
                .field("display_name", display_name)
                .finish(),
        }
    }
}
