use sc_auth::CredentialSubmission;

use serde::Deserialize;

/// Completed WeChat handshake: the authorization code has already been
/// exchanged for the account's open id by the caller.
#[derive(Debug, Deserialize)]
pub struct WxLoginRequest {
    pub open_id: String,
    #[serde(default)]
    pub nickname: String,
}

impl From<WxLoginRequest> for CredentialSubmission {
    fn from(req: WxLoginRequest) -> Self {
        CredentialSubmission::External {
            external_id: req.open_id,
            display_name: req.nickname,
        }
    }
}
