use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB,
    DEFAULT_HASH_PARALLELISM, DEFAULT_STORE_TIMEOUT_MS, DEFAULT_TOKEN_TTL_SECS,
    MAX_HASH_PARALLELISM, MAX_STORE_TIMEOUT_MS, MAX_TOKEN_TTL_SECS, MIN_HASH_MEMORY_KIB_PER_LANE,
    MIN_JWT_SECRET_LENGTH, MIN_STORE_TIMEOUT_MS, MIN_TOKEN_TTL_SECS,
};

use std::time::Duration;

use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret; required
    pub jwt_secret: Option<String>,
    pub token_ttl_secs: u64,
    /// Deadline for each identity store call
    pub store_timeout_ms: u64,
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
    pub hash_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
            hash_memory_kib: DEFAULT_HASH_MEMORY_KIB,
            hash_iterations: DEFAULT_HASH_ITERATIONS,
            hash_parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("store_timeout_ms", &self.store_timeout_ms)
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("hash_iterations", &self.hash_iterations)
            .field("hash_parallelism", &self.hash_parallelism)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match &self.jwt_secret {
            None => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (set SC_AUTH_JWT_SECRET)",
                ));
            }
            Some(secret) if secret.chars().count() < MIN_JWT_SECRET_LENGTH => {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {} characters",
                    MIN_JWT_SECRET_LENGTH
                )));
            }
            Some(_) => {}
        }

        if !(MIN_TOKEN_TTL_SECS..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(ConfigError::auth(format!(
                "auth.token_ttl_secs must be {}-{}, got {}",
                MIN_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS, self.token_ttl_secs
            )));
        }

        if !(MIN_STORE_TIMEOUT_MS..=MAX_STORE_TIMEOUT_MS).contains(&self.store_timeout_ms) {
            return Err(ConfigError::auth(format!(
                "auth.store_timeout_ms must be {}-{}, got {}",
                MIN_STORE_TIMEOUT_MS, MAX_STORE_TIMEOUT_MS, self.store_timeout_ms
            )));
        }

        if !(1..=MAX_HASH_PARALLELISM).contains(&self.hash_parallelism) {
            return Err(ConfigError::auth(format!(
                "auth.hash_parallelism must be 1-{}, got {}",
                MAX_HASH_PARALLELISM, self.hash_parallelism
            )));
        }

        if self.hash_iterations < 1 {
            return Err(ConfigError::auth("auth.hash_iterations must be at least 1"));
        }

        let min_memory = MIN_HASH_MEMORY_KIB_PER_LANE * self.hash_parallelism;
        if self.hash_memory_kib < min_memory {
            return Err(ConfigError::auth(format!(
                "auth.hash_memory_kib must be at least {} for parallelism {}, got {}",
                min_memory, self.hash_parallelism, self.hash_memory_kib
            )));
        }

        Ok(())
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
