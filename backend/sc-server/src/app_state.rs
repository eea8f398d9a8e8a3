use crate::error::{Result as ServerErrorResult, ServerError};

use sc_auth::{
    AuthorizationGate, CredentialHasher, HashingParams, IdentityResolver, SessionTokenCodec,
};
use sc_config::AuthConfig;
use sc_core::IdentityStore;
use sc_db::UserRepository;

use std::sync::Arc;

use chrono::TimeDelta;
use log::info;
use sqlx::SqlitePool;

/// Shared state handed to every handler.
///
/// Everything in here is immutable after startup; clones share the same
/// resolver, gate and pool.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub users: Arc<dyn IdentityStore>,
    pub resolver: Arc<IdentityResolver>,
    pub gate: AuthorizationGate,
}

impl AppState {
    /// Wire the identity components over `pool` from validated auth config.
    pub fn build(pool: SqlitePool, auth: &AuthConfig) -> ServerErrorResult<Self> {
        let secret = auth.jwt_secret.as_deref().ok_or_else(|| ServerError::Startup {
            message: "auth.jwt_secret is not set".to_string(),
        })?;

        let ttl = TimeDelta::from_std(auth.token_ttl()).map_err(|e| ServerError::Startup {
            message: format!("auth.token_ttl_secs out of range: {}", e),
        })?;
        let codec = Arc::new(SessionTokenCodec::with_hs256(secret.as_bytes(), ttl));

        let hasher = CredentialHasher::new(HashingParams {
            memory_kib: auth.hash_memory_kib,
            iterations: auth.hash_iterations,
            parallelism: auth.hash_parallelism,
        })?;

        let users: Arc<dyn IdentityStore> = Arc::new(UserRepository::new(pool.clone()));
        let resolver =
            IdentityResolver::new(users.clone(), hasher, codec.clone(), auth.store_timeout())?;
        let gate = AuthorizationGate::new(codec);

        info!("Identity resolver ready (token ttl {}s)", ttl.num_seconds());

        Ok(Self {
            pool,
            users,
            resolver: Arc::new(resolver),
            gate,
        })
    }
}
