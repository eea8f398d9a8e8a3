use crate::{CredentialHasher, HashingParams, IdentityResolver, SessionTokenCodec};

use sc_core::{
    IdentityStore, NewUser, StoreError, StoreResult, UniqueField, User, UserUpdate,
};

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::TimeDelta;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

/// Cheap work factor so tests stay fast
pub fn test_hasher() -> CredentialHasher {
    CredentialHasher::new(HashingParams {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}

pub fn test_codec() -> Arc<SessionTokenCodec> {
    Arc::new(SessionTokenCodec::with_hs256(
        TEST_SECRET,
        TimeDelta::hours(1),
    ))
}

pub fn resolver_over(store: Arc<dyn IdentityStore>) -> IdentityResolver {
    IdentityResolver::new(
        store,
        test_hasher(),
        test_codec(),
        Duration::from_millis(500),
    )
    .unwrap()
}

/// Identity store that keeps records in a vector and checks uniqueness under
/// the same lock as the insert.
#[derive(Default)]
pub struct InMemoryIdentityStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn insert_raw(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    fn find(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| predicate(u))
            .cloned()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.find(|u| u.id == id))
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.find(|u| u.username == username))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.find(|u| u.email.as_deref() == Some(email)))
    }

    async fn find_by_external_id(&self, external_id: &str) -> StoreResult<Option<User>> {
        Ok(self.find(|u| u.external_id.as_deref() == Some(external_id)))
    }

    async fn exists_by_username(&self, username: &str) -> StoreResult<bool> {
        Ok(self.find(|u| u.username == username).is_some())
    }

    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        // Let concurrent callers interleave between the pre-check and here
        tokio::task::yield_now().await;

        let mut users = self.users.lock().unwrap();
        for existing in users.iter() {
            if existing.username == new_user.username {
                return Err(StoreError::conflict(UniqueField::Username));
            }
            if new_user.email.is_some() && existing.email == new_user.email {
                return Err(StoreError::conflict(UniqueField::Email));
            }
            if new_user.external_id.is_some() && existing.external_id == new_user.external_id {
                return Err(StoreError::conflict(UniqueField::ExternalId));
            }
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            email: new_user.email,
            external_id: new_user.external_id,
            display_name: new_user.display_name,
            created_at: new_user.created_at,
            updated_at: new_user.created_at,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_fields(&self, id: Uuid, update: UserUpdate) -> StoreResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::not_found(format!("user {}", id)))?;

        if let Some(display_name) = update.display_name {
            user.display_name = Some(display_name);
        }
        if let Some(email) = update.email {
            user.email = Some(email);
        }
        if let Some(password_hash) = update.password_hash {
            user.password_hash = Some(password_hash);
        }
        user.updated_at = update.updated_at;

        Ok(user.clone())
    }
}

/// Identity store whose every call fails as if the database were down
pub struct UnavailableIdentityStore;

#[async_trait]
impl IdentityStore for UnavailableIdentityStore {
    async fn find_by_id(&self, _id: Uuid) -> StoreResult<Option<User>> {
        Err(StoreError::unavailable("connection refused"))
    }

    async fn find_by_username(&self, _username: &str) -> StoreResult<Option<User>> {
        Err(StoreError::unavailable("connection refused"))
    }

    async fn find_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
        Err(StoreError::unavailable("connection refused"))
    }

    async fn find_by_external_id(&self, _external_id: &str) -> StoreResult<Option<User>> {
        Err(StoreError::unavailable("connection refused"))
    }

    async fn exists_by_username(&self, _username: &str) -> StoreResult<bool> {
        Err(StoreError::unavailable("connection refused"))
    }

    async fn create(&self, _new_user: NewUser) -> StoreResult<User> {
        Err(StoreError::unavailable("connection refused"))
    }

    async fn update_fields(&self, _id: Uuid, _update: UserUpdate) -> StoreResult<User> {
        Err(StoreError::unavailable("connection refused"))
    }
}

/// Identity store that never answers within any reasonable deadline
pub struct StalledIdentityStore;

impl StalledIdentityStore {
    async fn stall() {
        tokio::time::sleep(Duration::from_secs(30)).await;
    }
}

#[async_trait]
impl IdentityStore for StalledIdentityStore {
    async fn find_by_id(&self, _id: Uuid) -> StoreResult<Option<User>> {
        Self::stall().await;
        Ok(None)
    }

    async fn find_by_username(&self, _username: &str) -> StoreResult<Option<User>> {
        Self::stall().await;
        Ok(None)
    }

    async fn find_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
        Self::stall().await;
        Ok(None)
    }

    async fn find_by_external_id(&self, _external_id: &str) -> StoreResult<Option<User>> {
        Self::stall().await;
        Ok(None)
    }

    async fn exists_by_username(&self, _username: &str) -> StoreResult<bool> {
        Self::stall().await;
        Ok(false)
    }

    async fn create(&self, _new_user: NewUser) -> StoreResult<User> {
        Self::stall().await;
        Err(StoreError::unavailable("stalled"))
    }

    async fn update_fields(&self, _id: Uuid, _update: UserUpdate) -> StoreResult<User> {
        Self::stall().await;
        Err(StoreError::unavailable("stalled"))
    }
}
