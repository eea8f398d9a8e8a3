//! Password hashing and verification using Argon2id.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so
//! verification always uses the parameters recorded in the digest itself.
//! Raising the configured work factor therefore only affects new digests.

use crate::{AuthError, HashingParams, Result as AuthErrorResult};

use std::panic::Location;

use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use argon2::{Algorithm, Argon2, Params, Version};
use error_location::ErrorLocation;

#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    #[track_caller]
    pub fn new(params: HashingParams) -> AuthErrorResult<Self> {
        let argon2_params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            None,
        )
        .map_err(|e| AuthError::hashing(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params),
        })
    }

    /// Hash `plaintext` with a fresh random salt.
    #[track_caller]
    pub fn hash(&self, plaintext: &str) -> AuthErrorResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AuthError::hashing(format!("Failed to hash password: {}", e)))?;

        Ok(digest.to_string())
    }

    /// Check `plaintext` against a stored digest.
    ///
    /// A mismatch is `Ok(false)`; only a digest that cannot be parsed or uses
    /// an unsupported algorithm is an error.
    #[track_caller]
    pub fn verify(&self, plaintext: &str, digest: &str) -> AuthErrorResult<bool> {
        let parsed = PasswordHash::new(digest).map_err(|e| AuthError::MalformedDigest {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::MalformedDigest {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
