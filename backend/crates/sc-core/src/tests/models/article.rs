use crate::{Article, CoreError};

use uuid::Uuid;

#[test]
fn test_article_new() {
    let user_id = Uuid::new_v4();
    let article = Article::new(
        user_id,
        "Rust ownership".to_string(),
        "https://example.com/ownership".to_string(),
    );

    assert_eq!(article.user_id, user_id);
    assert_eq!(article.title, "Rust ownership");
    assert!(article.tags.is_empty());
    assert!(article.summary.is_none());
    assert_eq!(article.created_at, article.updated_at);
    assert!(article.validate().is_ok());
}

#[test]
fn test_article_blank_title_rejected() {
    let article = Article::new(
        Uuid::new_v4(),
        "   ".to_string(),
        "https://example.com".to_string(),
    );

    let result = article.validate();

    assert!(matches!(
        result,
        Err(CoreError::Validation { field: "title", .. })
    ));
}

#[test]
fn test_article_blank_url_rejected() {
    let article = Article::new(Uuid::new_v4(), "Title".to_string(), String::new());

    let result = article.validate();

    assert!(matches!(result, Err(CoreError::Validation { field: "url", .. })));
}
