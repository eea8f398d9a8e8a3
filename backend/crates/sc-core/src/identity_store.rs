//! Contract between the identity resolver and durable storage.
//!
//! Implementations must enforce uniqueness of `username`, `email` (when set)
//! and `external_id` (when set) atomically at the storage layer and report a
//! violation as [`StoreError::Conflict`](crate::StoreError::Conflict). The
//! resolver's existence checks are advisory only; two concurrent `create`
//! calls for the same unique value must never both succeed.

use crate::{NewUser, StoreResult, User, UserUpdate};

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_external_id(&self, external_id: &str) -> StoreResult<Option<User>>;

    async fn exists_by_username(&self, username: &str) -> StoreResult<bool>;

    /// Insert a new identity and return it with its store-assigned id.
    async fn create(&self, new_user: NewUser) -> StoreResult<User>;

    /// Apply the set fields of `update` and return the updated identity.
    /// Fails with `NotFound` if no identity has this id.
    async fn update_fields(&self, id: Uuid, update: UserUpdate) -> StoreResult<User>;
}
