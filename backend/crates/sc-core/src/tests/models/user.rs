use crate::{NewUser, User, UserUpdate};

use chrono::Utc;
use googletest::prelude::*;
use uuid::Uuid;

fn stored(new_user: NewUser) -> User {
    User {
        id: Uuid::new_v4(),
        username: new_user.username,
        password_hash: new_user.password_hash,
        email: new_user.email,
        external_id: new_user.external_id,
        display_name: new_user.display_name,
        created_at: new_user.created_at,
        updated_at: new_user.created_at,
    }
}

#[test]
fn given_local_registration_when_building_new_user_then_has_password_and_no_external_id() {
    let new_user = NewUser::local(
        "alice".to_string(),
        "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
        Some("alice@example.com".to_string()),
    );

    assert_that!(new_user.username, eq("alice"));
    assert_that!(new_user.password_hash, some(anything()));
    assert_that!(new_user.external_id, none());
    assert_that!(new_user.display_name, none());
}

#[test]
fn given_external_login_when_building_new_user_then_has_no_password() {
    let new_user = NewUser::external(
        "wx_oABC1234".to_string(),
        "oABC1234567890".to_string(),
        "Alice".to_string(),
    );

    let user = stored(new_user);

    assert_that!(user.is_external(), eq(true));
    assert_that!(user.has_password(), eq(false));
    assert_eq!(user.display_name.as_deref(), Some("Alice"));
    assert_that!(user.email, none());
}

#[test]
fn given_user_with_password_when_debug_formatted_then_hash_is_redacted() {
    let user = stored(NewUser::local(
        "bob".to_string(),
        "secret-digest-value".to_string(),
        None,
    ));

    let debug = format!("{:?}", user);

    assert_that!(debug, contains_substring("<redacted>"));
    assert_that!(debug, not(contains_substring("secret-digest-value")));
}

#[test]
fn given_update_builder_when_setting_display_name_then_other_fields_stay_unset() {
    let before = Utc::now();
    let update = UserUpdate::new().display_name("Alice2");

    assert_eq!(update.display_name.as_deref(), Some("Alice2"));
    assert_that!(update.email, none());
    assert_that!(update.password_hash, none());
    assert!(update.updated_at >= before);
}
