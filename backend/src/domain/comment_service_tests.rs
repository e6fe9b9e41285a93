//! Tests for the comment service.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockArticleRepository, MockCommentRepository, MockUserRepository};
use crate::domain::{Article, ArticleInput, Email, ErrorCode, PasswordDigest, Role, User, UserId};
use crate::test_support::MutableClock;

fn service(
    comments: MockCommentRepository,
    articles: MockArticleRepository,
    users: MockUserRepository,
) -> CommentServiceImpl<MockCommentRepository, MockArticleRepository, MockUserRepository> {
    CommentServiceImpl::new(
        Arc::new(comments),
        Arc::new(articles),
        Arc::new(users),
        Arc::new(MutableClock::fixed()),
    )
}

fn stored_article() -> Article {
    ArticleInput {
        title: Some("Tech Breakthrough in AI".to_owned()),
        author: Some("Jane Smith".to_owned()),
        category: Some("Technology".to_owned()),
        content: Some("Body".to_owned()),
        ..ArticleInput::default()
    }
    .into_article(Utc::now())
    .expect("valid article")
}

#[rstest]
#[tokio::test]
async fn create_stamps_caller_and_appends_to_article() {
    let article = stored_article();
    let article_id = article.id;
    let caller = Identity::new(UserId::random(), Role::Registered);

    let mut articles = MockArticleRepository::new();
    articles
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(article)));
    let mut comments = MockCommentRepository::new();
    comments
        .expect_insert()
        .withf(move |comment: &Comment| {
            comment.user == caller.user_id && comment.article == article_id && !comment.approved
        })
        .times(1)
        .return_once(|_| Ok(()));
    articles
        .expect_append_comment()
        .withf(move |id: &ArticleId, _: &CommentId| *id == article_id)
        .times(1)
        .return_once(|_, _| Ok(true));

    let created = service(comments, articles, MockUserRepository::new())
        .create(&caller, &article_id, Some("Great article!".to_owned()))
        .await
        .expect("comment created");

    assert_eq!(created.user, caller.user_id);
    assert_eq!(created.content, "Great article!");
    assert!(!created.approved);
}

#[rstest]
#[tokio::test]
async fn create_on_missing_article_stores_nothing() {
    let mut articles = MockArticleRepository::new();
    articles.expect_find_by_id().return_once(|_| Ok(None));
    articles.expect_append_comment().never();
    let mut comments = MockCommentRepository::new();
    comments.expect_insert().never();

    let err = service(comments, articles, MockUserRepository::new())
        .create(
            &Identity::new(UserId::random(), Role::Registered),
            &ArticleId::random(),
            Some("Hello".to_owned()),
        )
        .await
        .expect_err("missing article");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(None)]
#[case(Some("   ".to_owned()))]
#[tokio::test]
async fn create_requires_content(#[case] content: Option<String>) {
    let mut articles = MockArticleRepository::new();
    articles.expect_find_by_id().never();

    let err = service(MockCommentRepository::new(), articles, MockUserRepository::new())
        .create(
            &Identity::new(UserId::random(), Role::Editor),
            &ArticleId::random(),
            content,
        )
        .await
        .expect_err("invalid");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn guests_cannot_comment() {
    let err = service(
        MockCommentRepository::new(),
        MockArticleRepository::new(),
        MockUserRepository::new(),
    )
    .create(
        &Identity::new(UserId::random(), Role::Guest),
        &ArticleId::random(),
        Some("Hi".to_owned()),
    )
    .await
    .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case(Role::Registered, ErrorCode::Forbidden)]
#[case(Role::Guest, ErrorCode::Forbidden)]
#[tokio::test]
async fn readers_cannot_moderate(#[case] role: Role, #[case] expected: ErrorCode) {
    let mut comments = MockCommentRepository::new();
    comments.expect_approve().never();

    let err = service(comments, MockArticleRepository::new(), MockUserRepository::new())
        .approve(&Identity::new(UserId::random(), role), &CommentId::random())
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn approving_missing_comment_is_not_found() {
    let mut comments = MockCommentRepository::new();
    comments.expect_approve().return_once(|_| Ok(None));

    let err = service(comments, MockArticleRepository::new(), MockUserRepository::new())
        .approve(
            &Identity::new(UserId::random(), Role::Editor),
            &CommentId::random(),
        )
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Comment not found");
}

#[rstest]
#[tokio::test]
async fn list_all_resolves_authors_and_articles() {
    let article = stored_article();
    let reader = User::register(
        Email::new("user@example.com").expect("email"),
        PasswordDigest::new("$argon2id$stub"),
        Utc::now(),
    );
    let resolved = Comment::new(article.id, reader.id, "Resolved", Utc::now());
    let dangling = Comment::new(ArticleId::random(), UserId::random(), "Orphan", Utc::now());

    let mut comments = MockCommentRepository::new();
    comments
        .expect_list_all()
        .return_once(move || Ok(vec![resolved, dangling]));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_ids()
        .return_once(move |_| Ok(vec![reader]));
    let mut articles = MockArticleRepository::new();
    articles
        .expect_find_by_ids()
        .return_once(move |_| Ok(vec![article]));

    let listings = service(comments, articles, users)
        .list_all(&Identity::new(UserId::random(), Role::Admin))
        .await
        .expect("listing succeeds");

    assert_eq!(listings.len(), 2);
    let first = &listings[0];
    assert_eq!(
        first.author.as_ref().map(|a| a.email.as_ref()),
        Some("user@example.com")
    );
    assert_eq!(
        first.article.as_ref().map(|a| a.title.as_str()),
        Some("Tech Breakthrough in AI")
    );
    assert!(listings[1].author.is_none());
    assert!(listings[1].article.is_none());
}
