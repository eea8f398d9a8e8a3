pub mod article;
pub mod new_user;
pub mod unique_field;
pub mod user;
pub mod user_update;
