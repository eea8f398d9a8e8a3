use sc_auth::CredentialSubmission;

use serde::Deserialize;

/// Body of `POST /api/users`. No `Debug`: it carries a plaintext password.
#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<RegisterUserRequest> for CredentialSubmission {
    fn from(req: RegisterUserRequest) -> Self {
        CredentialSubmission::LocalRegistration {
            username: req.username,
            password: req.password,
            email: req.email,
        }
    }
}
