use sc_auth::CredentialSubmission;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl From<LoginRequest> for CredentialSubmission {
    fn from(req: LoginRequest) -> Self {
        CredentialSubmission::LocalLogin {
            username: req.username,
            password: req.password,
        }
    }
}
