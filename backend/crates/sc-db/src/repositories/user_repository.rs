use crate::repositories::{from_millis, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use sc_core::{IdentityStore, NewUser, StoreResult, User, UserUpdate};

use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, password_hash, email, external_id, display_name, \
                            created_at, updated_at";

#[derive(FromRow)]
struct UserRow {
    id: String,
    username: String,
    password_hash: Option<String>,
    email: Option<String>,
    external_id: Option<String>,
    display_name: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    fn try_from(row: UserRow) -> DbErrorResult<Self> {
        Ok(User {
            id: parse_uuid(&row.id, "users.id")?,
            username: row.username,
            password_hash: row.password_hash,
            email: row.email,
            external_id: row.external_id,
            display_name: row.display_name,
            created_at: from_millis(row.created_at, "users.created_at")?,
            updated_at: from_millis(row.updated_at, "users.updated_at")?,
        })
    }
}

/// SQLite-backed identity store. Uniqueness of username, email and
/// external id comes from the table's UNIQUE constraints.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> DbErrorResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {} = ?", USER_COLUMNS, column);

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    pub async fn insert(&self, new_user: NewUser) -> DbErrorResult<User> {
        let id = Uuid::new_v4();
        let created_at = new_user.created_at.timestamp_millis();

        sqlx::query(
            r#"
              INSERT INTO users (
                  id, username, password_hash, email, external_id, display_name,
                  created_at, updated_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(id.to_string())
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.email)
        .bind(&new_user.external_id)
        .bind(&new_user.display_name)
        .bind(created_at)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let stamped = from_millis(created_at, "users.created_at")?;
        Ok(User {
            id,
            username: new_user.username,
            password_hash: new_user.password_hash,
            email: new_user.email,
            external_id: new_user.external_id,
            display_name: new_user.display_name,
            created_at: stamped,
            updated_at: stamped,
        })
    }

    /// Apply the `Some` fields of `update`. `updated_at` always moves forward,
    /// even when two updates land within the same millisecond.
    pub async fn update(&self, id: Uuid, update: UserUpdate) -> DbErrorResult<User> {
        let sql = format!(
            r#"
              UPDATE users
              SET display_name = COALESCE(?, display_name),
                  email = COALESCE(?, email),
                  password_hash = COALESCE(?, password_hash),
                  updated_at = MAX(?, updated_at + 1)
              WHERE id = ?
              RETURNING {}
              "#,
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&update.display_name)
            .bind(&update.email)
            .bind(&update.password_hash)
            .bind(update.updated_at.timestamp_millis())
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => User::try_from(row),
            None => Err(DbError::not_found(format!("user {}", id))),
        }
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl IdentityStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.find_one("id", &id.to_string()).await?)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.find_one("username", username).await?)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.find_one("email", email).await?)
    }

    async fn find_by_external_id(&self, external_id: &str) -> StoreResult<Option<User>> {
        Ok(self.find_one("external_id", external_id).await?)
    }

    async fn exists_by_username(&self, username: &str) -> StoreResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(DbError::from)?;
        Ok(exists)
    }

    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        Ok(self.insert(new_user).await?)
    }

    async fn update_fields(&self, id: Uuid, update: UserUpdate) -> StoreResult<User> {
        Ok(self.update(id, update).await?)
    }
}
