pub mod error;
pub mod identity_store;
pub mod models;

pub use error::{CoreError, Result, StoreError, StoreResult};
pub use identity_store::IdentityStore;
pub use models::article::Article;
pub use models::new_user::NewUser;
pub use models::unique_field::UniqueField;
pub use models::user::User;
pub use models::user_update::UserUpdate;

#[cfg(test)]
mod tests;
