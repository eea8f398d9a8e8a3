#![allow(dead_code)]

use sc_core::{Article, NewUser};

use chrono::{TimeDelta, Utc};
use uuid::Uuid;

/// Local identity insert payload
pub fn local_user(username: &str) -> NewUser {
    NewUser::local(
        username.to_string(),
        "$argon2id$v=19$m=1024,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
        Some(format!("{}@example.com", username)),
    )
}

/// External identity insert payload
pub fn external_user(external_id: &str, display_name: &str) -> NewUser {
    NewUser::external(
        format!("wx_{}", external_id.chars().take(8).collect::<String>()),
        external_id.to_string(),
        display_name.to_string(),
    )
}

/// Article with every optional field filled
pub fn test_article(user_id: Uuid, title: &str, url: &str) -> Article {
    let mut article = Article::new(user_id, title.to_string(), url.to_string());
    article.content = format!("Body of {}", title);
    article.author = "Test Author".to_string();
    article.source = "test-feed".to_string();
    article.summary = Some("Short summary".to_string());
    article.tags = vec!["rust".to_string(), "testing".to_string()];
    article
}

/// Article created `minutes_ago` minutes in the past
pub fn test_article_at(user_id: Uuid, title: &str, url: &str, minutes_ago: i64) -> Article {
    let mut article = test_article(user_id, title, url);
    let at = Utc::now() - TimeDelta::minutes(minutes_ago);
    article.published_at = at;
    article.created_at = at;
    article.updated_at = at;
    article
}
