use crate::{AuthError, Result as AuthErrorResult, SessionClaims};

use std::panic::Location;

use chrono::{DateTime, TimeDelta, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

/// A freshly signed session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates HS256 session tokens.
///
/// Tokens are stateless: validity is signature plus expiry, nothing else.
/// The secret is fixed for the lifetime of the codec; replacing it
/// invalidates every token issued under the old one.
pub struct SessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl SessionTokenCodec {
    /// Create codec with HS256 (symmetric secret)
    pub fn with_hs256(secret: &[u8], ttl: TimeDelta) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by hand after the signature so that `now == exp`
        // is already expired and no clock skew is tolerated.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Default lifetime of issued tokens
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Issue a token for `identity_id` valid for the configured ttl
    #[track_caller]
    pub fn issue(&self, identity_id: Uuid) -> AuthErrorResult<IssuedToken> {
        self.issue_at(identity_id, self.ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    #[track_caller]
    pub fn issue_at(
        &self,
        identity_id: Uuid,
        ttl: TimeDelta,
        now: DateTime<Utc>,
    ) -> AuthErrorResult<IssuedToken> {
        if ttl <= TimeDelta::zero() {
            return Err(AuthError::validation("ttl", "token ttl must be positive"));
        }

        // `exp` has whole-second precision; round up so the token never
        // expires before `now + ttl`.
        let deadline = now + ttl;
        let issued_at = now.timestamp();
        let expires_at = deadline.timestamp() + i64::from(deadline.timestamp_subsec_nanos() > 0);
        let claims = SessionClaims::new(identity_id, issued_at, expires_at);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| AuthError::TokenIssue {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            },
        )?;

        let expires_at = DateTime::from_timestamp(expires_at, 0).ok_or_else(|| {
            AuthError::validation("ttl", "token expiry is out of range")
        })?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a token against the local clock and return the identity id
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Uuid> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    ///
    /// The signature is verified before any claim is looked at.
    #[track_caller]
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> AuthErrorResult<Uuid> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthError::TokenSignatureInvalid {
                        location: ErrorLocation::from(Location::caller()),
                    }
                }
                _ => AuthError::TokenMalformed {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                },
            })?;

        let claims = token_data.claims;
        if now.timestamp() >= claims.exp {
            return Err(AuthError::TokenExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        claims.identity_id()
    }
}
