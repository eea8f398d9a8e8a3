//! Identity resolution: turns a credential submission into an authenticated
//! session, creating or refreshing the stored identity as needed.
//!
//! The resolver holds no mutable state. Existence checks are advisory; the
//! identity store's uniqueness constraints decide every race, and a store
//! conflict is translated into the matching client-facing error.

use crate::{
    AuthError, AuthenticatedSession, CredentialHasher, CredentialSubmission,
    EXTERNAL_USERNAME_ID_CHARS, EXTERNAL_USERNAME_PREFIX, MAX_PASSWORD_BYTES, MAX_USERNAME_LENGTH,
    Result as AuthErrorResult, SessionTokenCodec,
};

use sc_core::{IdentityStore, NewUser, StoreError, StoreResult, UniqueField, User, UserUpdate};

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use error_location::ErrorLocation;
use log::{debug, error, info, warn};

/// Plaintext behind the digest used to equalize timing for unknown users
const DUMMY_PASSWORD: &str = "sc-auth-timing-equalizer";

pub struct IdentityResolver {
    store: Arc<dyn IdentityStore>,
    hasher: CredentialHasher,
    codec: Arc<SessionTokenCodec>,
    store_timeout: Duration,
    dummy_digest: String,
}

impl IdentityResolver {
    /// Build a resolver. Hashes the timing-equalizer digest once up front.
    pub fn new(
        store: Arc<dyn IdentityStore>,
        hasher: CredentialHasher,
        codec: Arc<SessionTokenCodec>,
        store_timeout: Duration,
    ) -> AuthErrorResult<Self> {
        let dummy_digest = hasher.hash(DUMMY_PASSWORD)?;

        Ok(Self {
            store,
            hasher,
            codec,
            store_timeout,
            dummy_digest,
        })
    }

    pub fn codec(&self) -> &Arc<SessionTokenCodec> {
        &self.codec
    }

    /// Dispatch a submission to the operation for its variant
    pub async fn resolve(
        &self,
        submission: CredentialSubmission,
    ) -> AuthErrorResult<AuthenticatedSession> {
        let kind = submission.kind();
        debug!("Resolving {} submission", kind);

        let outcome = match submission {
            CredentialSubmission::LocalRegistration {
                username,
                password,
                email,
            } => {
                self.register_local(&username, &password, email.as_deref())
                    .await
            }
            CredentialSubmission::LocalLogin { username, password } => {
                self.login_local(&username, &password).await
            }
            CredentialSubmission::External {
                external_id,
                display_name,
            } => self.login_external(&external_id, &display_name).await,
        };

        if matches!(&outcome, Err(e) if e.is_authentication_failure()) {
            warn!("Rejected {} submission", kind);
        }
        outcome
    }

    /// Create a local identity and open a session for it.
    ///
    /// Fails with `UsernameTaken` if the username exists, whether that is seen
    /// by the pre-check or by the store's constraint during a race.
    pub async fn register_local(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> AuthErrorResult<AuthenticatedSession> {
        validate_username(username)?;
        validate_password(password)?;
        let email = normalize_email(email)?;

        let taken = self
            .with_deadline(self.store.exists_by_username(username))
            .await
            .map_err(|e| store_failure("exists_by_username", e))?;
        if taken {
            warn!("Registration rejected: username '{}' already taken", username);
            return Err(AuthError::username_taken(username));
        }

        let digest = self.hash_password(password).await?;
        let new_user = NewUser::local(username.to_owned(), digest, email);

        let user = self
            .with_deadline(self.store.create(new_user))
            .await
            .map_err(|e| creation_failure(e, username))?;

        info!("Registered local identity {} ({})", user.id, user.username);
        self.open_session(user)
    }

    /// Authenticate a local identity by username and password.
    ///
    /// Unknown usernames, identities without a password, and wrong passwords
    /// all fail with the same `InvalidCredentials` value. Never mutates.
    pub async fn login_local(
        &self,
        username: &str,
        password: &str,
    ) -> AuthErrorResult<AuthenticatedSession> {
        validate_username(username)?;
        validate_password(password)?;

        let user = self
            .with_deadline(self.store.find_by_username(username))
            .await
            .map_err(|e| store_failure("find_by_username", e))?;

        let stored_digest = user.as_ref().and_then(|u| u.password_hash.clone());
        let matched = match stored_digest {
            Some(digest) => self.verify_password(password, digest).await?,
            None => {
                self.verify_password(password, self.dummy_digest.clone())
                    .await?;
                false
            }
        };

        match user {
            Some(user) if matched => {
                info!("Local login for identity {}", user.id);
                self.open_session(user)
            }
            _ => {
                warn!("Local login rejected");
                Err(AuthError::invalid_credentials())
            }
        }
    }

    /// Create-or-refresh the identity linked to an external provider account.
    ///
    /// The first call for an `external_id` creates the identity; every later
    /// call refreshes `display_name` and `updated_at` on that same identity.
    pub async fn login_external(
        &self,
        external_id: &str,
        display_name: &str,
    ) -> AuthErrorResult<AuthenticatedSession> {
        if external_id.trim().is_empty() {
            return Err(AuthError::validation(
                "external_id",
                "external id cannot be empty",
            ));
        }

        let existing = self
            .with_deadline(self.store.find_by_external_id(external_id))
            .await
            .map_err(|e| store_failure("find_by_external_id", e))?;

        let user = match existing {
            Some(user) => {
                let update = UserUpdate::new().display_name(display_name);
                let refreshed = self
                    .with_deadline(self.store.update_fields(user.id, update))
                    .await
                    .map_err(|e| store_failure("update_fields", e))?;

                info!("Refreshed external identity {}", refreshed.id);
                refreshed
            }
            None => {
                let username = synthesize_username(external_id);
                let new_user = NewUser::external(
                    username.clone(),
                    external_id.to_owned(),
                    display_name.to_owned(),
                );

                let created = self
                    .with_deadline(self.store.create(new_user))
                    .await
                    .map_err(|e| external_creation_failure(e, &username))?;

                info!(
                    "Created external identity {} ({})",
                    created.id, created.username
                );
                created
            }
        };

        self.open_session(user)
    }

    fn open_session(&self, user: User) -> AuthErrorResult<AuthenticatedSession> {
        let issued = self.codec.issue(user.id)?;

        Ok(AuthenticatedSession {
            user,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    /// Bound a store call by the configured deadline
    async fn with_deadline<T>(
        &self,
        call: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::unavailable(format!(
                "identity store call exceeded {}ms",
                self.store_timeout.as_millis()
            ))),
        }
    }

    async fn hash_password(&self, password: &str) -> AuthErrorResult<String> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();

        let digest = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::hashing(format!("Hashing task failed: {}", e)))?;

        digest.inspect_err(|e| error!("Password hashing failed: {}", e))
    }

    async fn verify_password(&self, password: &str, digest: String) -> AuthErrorResult<bool> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();

        let outcome = tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AuthError::hashing(format!("Verification task failed: {}", e)))?;

        outcome.map_err(|e| match e {
            AuthError::MalformedDigest { .. } => {
                error!("Stored password digest is unusable: {}", e);
                AuthError::hashing("stored password digest is unusable")
            }
            other => other,
        })
    }
}

/// Username given to an identity created through an external provider
pub fn synthesize_username(external_id: &str) -> String {
    let slice: String = external_id
        .chars()
        .take(EXTERNAL_USERNAME_ID_CHARS)
        .collect();
    format!("{}{}", EXTERNAL_USERNAME_PREFIX, slice)
}

#[track_caller]
fn store_failure(operation: &str, source: StoreError) -> AuthError {
    error!("Identity store {} failed: {}", operation, source);
    AuthError::from(source)
}

/// Translate a failed `create` into the client-facing error for its cause
#[track_caller]
fn creation_failure(source: StoreError, username: &str) -> AuthError {
    match source.conflict_field() {
        Some(UniqueField::Username) => {
            warn!("Identity creation lost a race on username '{}'", username);
            AuthError::username_taken(username)
        }
        Some(UniqueField::Email) => {
            warn!("Identity creation rejected: email already registered");
            AuthError::EmailTaken {
                location: ErrorLocation::from(Location::caller()),
            }
        }
        Some(field) => {
            warn!("Identity creation lost a race on {}", field);
            AuthError::IdentityConflict {
                field,
                location: ErrorLocation::from(Location::caller()),
            }
        }
        None => store_failure("create", source),
    }
}

/// A failed external `create` never reports the synthesized username back;
/// every uniqueness loss is an identity conflict the caller may retry
#[track_caller]
fn external_creation_failure(source: StoreError, username: &str) -> AuthError {
    match source.conflict_field() {
        Some(field) => {
            warn!(
                "External identity creation for '{}' lost a race on {}",
                username, field
            );
            AuthError::IdentityConflict {
                field,
                location: ErrorLocation::from(Location::caller()),
            }
        }
        None => store_failure("create", source),
    }
}

fn validate_username(username: &str) -> AuthErrorResult<()> {
    if username.is_empty() {
        return Err(AuthError::validation("username", "username cannot be empty"));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(AuthError::validation(
            "username",
            format!("username cannot exceed {} characters", MAX_USERNAME_LENGTH),
        ));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(AuthError::validation(
            "username",
            "username cannot contain whitespace",
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> AuthErrorResult<()> {
    if password.is_empty() {
        return Err(AuthError::validation("password", "password cannot be empty"));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::validation(
            "password",
            format!("password cannot exceed {} bytes", MAX_PASSWORD_BYTES),
        ));
    }
    Ok(())
}

/// Blank email counts as absent
fn normalize_email(email: Option<&str>) -> AuthErrorResult<Option<String>> {
    match email.map(str::trim).filter(|e| !e.is_empty()) {
        None => Ok(None),
        Some(email) if email.contains('@') => Ok(Some(email.to_owned())),
        Some(_) => Err(AuthError::validation("email", "email address is invalid")),
    }
}
