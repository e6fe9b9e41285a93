//! Tests for the article service.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    ArticlePersistenceError, MockArticleRepository, MockCommentRepository, MockUserRepository,
};
use crate::domain::{Email, ErrorCode, PasswordDigest, Role, User};
use crate::test_support::MutableClock;

type Service = ArticleServiceImpl<MockArticleRepository, MockCommentRepository, MockUserRepository>;

struct Mocks {
    articles: MockArticleRepository,
    comments: MockCommentRepository,
    users: MockUserRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            articles: MockArticleRepository::new(),
            comments: MockCommentRepository::new(),
            users: MockUserRepository::new(),
        }
    }

    fn into_service(self, visibility: CommentVisibility) -> Service {
        ArticleServiceImpl::new(
            Arc::new(self.articles),
            Arc::new(self.comments),
            Arc::new(self.users),
            visibility,
            Arc::new(MutableClock::fixed()),
        )
    }
}

fn article(title: &str, comments: Vec<CommentId>) -> Article {
    ArticleInput {
        title: Some(title.to_owned()),
        author: Some("Jane Smith".to_owned()),
        category: Some("Technology".to_owned()),
        content: Some("Body".to_owned()),
        ..ArticleInput::default()
    }
    .into_article(Utc::now())
    .map(|mut article| {
        article.comments = comments;
        article
    })
    .expect("valid article")
}

fn comment(article: ArticleId, user: UserId, approved: bool) -> Comment {
    let mut comment = Comment::new(article, user, "Nice", Utc::now());
    comment.approved = approved;
    comment
}

fn user(email: &str) -> User {
    User::register(
        Email::new(email).expect("email"),
        PasswordDigest::new("$argon2id$stub"),
        Utc::now(),
    )
}

fn identity(role: Role) -> Identity {
    Identity::new(UserId::random(), role)
}

#[rstest]
#[tokio::test]
async fn list_attaches_comments_and_skips_dangling_references() {
    let article_id = ArticleId::random();
    let kept = comment(article_id, UserId::random(), false);
    let kept_id = kept.id;
    let mut listed = article("Tech Breakthrough in AI", vec![kept_id, CommentId::random()]);
    listed.id = article_id;

    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_list()
        .return_once(move |_| Ok(vec![listed]));
    mocks
        .comments
        .expect_find_by_ids()
        .times(1)
        .return_once(move |_| Ok(vec![kept]));
    mocks.users.expect_find_by_ids().never();

    let views = mocks
        .into_service(CommentVisibility::All)
        .list(&ArticleQuery::default())
        .await
        .expect("list succeeds");

    assert_eq!(views.len(), 1);
    let comments = &views[0].comments;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].comment.id, kept_id);
    assert!(comments[0].author.is_none());
}

#[rstest]
#[tokio::test]
async fn list_without_comments_skips_comment_lookup() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_list()
        .return_once(|_| Ok(vec![article("Quiet", Vec::new())]));
    mocks.comments.expect_find_by_ids().never();

    let views = mocks
        .into_service(CommentVisibility::All)
        .list(&ArticleQuery::default())
        .await
        .expect("list succeeds");
    assert!(views[0].comments.is_empty());
}

#[rstest]
#[case(CommentVisibility::All, 2)]
#[case(CommentVisibility::Approved, 1)]
#[tokio::test]
async fn get_applies_comment_visibility(
    #[case] visibility: CommentVisibility,
    #[case] expected: usize,
) {
    let reader = user("user@example.com");
    let reader_id = reader.id;
    let article_id = ArticleId::random();
    let approved = comment(article_id, reader_id, true);
    let pending = comment(article_id, reader_id, false);
    let mut stored = article("Policy", vec![approved.id, pending.id]);
    stored.id = article_id;

    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    mocks
        .comments
        .expect_find_by_ids()
        .return_once(move |_| Ok(vec![approved, pending]));
    mocks
        .users
        .expect_find_by_ids()
        .withf(move |ids: &[UserId]| ids == [reader_id])
        .return_once(move |_| Ok(vec![reader]));

    let view = mocks
        .into_service(visibility)
        .get(&article_id)
        .await
        .expect("article found");

    assert_eq!(view.comments.len(), expected);
    assert!(view.comments.iter().all(|c| {
        c.author
            .as_ref()
            .is_some_and(|author| author.email.as_ref() == "user@example.com")
    }));
}

#[rstest]
#[tokio::test]
async fn get_leaves_deleted_authors_unresolved() {
    let article_id = ArticleId::random();
    let orphan = comment(article_id, UserId::random(), false);
    let mut stored = article("Orphans", vec![orphan.id]);
    stored.id = article_id;

    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    mocks
        .comments
        .expect_find_by_ids()
        .return_once(move |_| Ok(vec![orphan]));
    mocks
        .users
        .expect_find_by_ids()
        .return_once(|_| Ok(Vec::new()));

    let view = mocks
        .into_service(CommentVisibility::All)
        .get(&article_id)
        .await
        .expect("article found");
    assert_eq!(view.comments.len(), 1);
    assert!(view.comments[0].author.is_none());
}

#[rstest]
#[tokio::test]
async fn get_missing_article_is_not_found() {
    let mut mocks = Mocks::new();
    mocks.articles.expect_find_by_id().return_once(|_| Ok(None));

    let err = mocks
        .into_service(CommentVisibility::All)
        .get(&ArticleId::random())
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Article not found");
}

#[rstest]
#[case(Role::Admin)]
#[case(Role::Editor)]
#[tokio::test]
async fn staff_can_publish(#[case] role: Role) {
    let mut mocks = Mocks::new();
    mocks.articles.expect_insert().times(1).return_once(|_| Ok(()));

    let input = ArticleInput {
        title: Some("New Political Reform Announced".to_owned()),
        author: Some("John Doe".to_owned()),
        category: Some("Politics".to_owned()),
        content: Some("The government announced...".to_owned()),
        ..ArticleInput::default()
    };
    let created = mocks
        .into_service(CommentVisibility::All)
        .create(&identity(role), input)
        .await
        .expect("publish succeeds");
    assert_eq!(created.category, "Politics");
    assert!(created.comments.is_empty());
}

#[rstest]
#[tokio::test]
async fn readers_cannot_publish_even_with_invalid_payload() {
    let mut mocks = Mocks::new();
    mocks.articles.expect_insert().never();

    let err = mocks
        .into_service(CommentVisibility::All)
        .create(&identity(Role::Registered), ArticleInput::default())
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn publishing_requires_title() {
    let mut mocks = Mocks::new();
    mocks.articles.expect_insert().never();

    let err = mocks
        .into_service(CommentVisibility::All)
        .create(&identity(Role::Editor), ArticleInput::default())
        .await
        .expect_err("invalid");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn updating_missing_article_is_not_found() {
    let mut mocks = Mocks::new();
    mocks.articles.expect_update().return_once(|_, _| Ok(None));

    let input = ArticleInput {
        title: Some("Renamed".to_owned()),
        ..ArticleInput::default()
    };
    let err = mocks
        .into_service(CommentVisibility::All)
        .update(&identity(Role::Editor), &ArticleId::random(), input)
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn editors_cannot_delete() {
    let mut mocks = Mocks::new();
    mocks.articles.expect_delete().never();

    let err = mocks
        .into_service(CommentVisibility::All)
        .delete(&identity(Role::Editor), &ArticleId::random())
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn store_failures_on_list_surface_as_internal_errors() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_list()
        .return_once(|_| Err(ArticlePersistenceError::query("syntax error")));

    let err = mocks
        .into_service(CommentVisibility::All)
        .list(&ArticleQuery::default())
        .await
        .expect_err("failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}
