//! Tests for users API handlers.

use super::*;
use crate::inbound::http::test_utils::MockPorts;
use crate::outbound::security::TOKEN_TTL_SECS;
use crate::test_support::{TestStack, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::Value;

#[fixture]
fn stack() -> TestStack {
    TestStack::new()
}

fn credentials(email: &str, password: &str) -> CredentialsRequest {
    CredentialsRequest {
        email: Some(email.to_owned()),
        password: Some(password.to_owned()),
    }
}

fn error_code(body: &Value) -> Option<&str> {
    body.get("code").and_then(Value::as_str)
}

#[rstest]
#[actix_web::test]
async fn register_returns_created_user_without_password(stack: TestStack) {
    let app = actix_test::init_service(test_app(stack.state.clone())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(credentials("user@test.com", "pw123456"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("email").and_then(Value::as_str), Some("user@test.com"));
    assert_eq!(body.get("role").and_then(Value::as_str), Some("registered"));
    assert!(body.get("password").is_none());
    assert!(body.get("passwordDigest").is_none());
    assert_eq!(
        body.pointer("/preferences/notifications"),
        Some(&Value::Bool(true))
    );
}

#[rstest]
#[actix_web::test]
async fn register_rejects_duplicate_email(stack: TestStack) {
    stack
        .seed_user("taken@test.com", "pw", Role::Registered)
        .await
        .expect("seed");
    let app = actix_test::init_service(test_app(stack.state.clone())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(credentials("taken@test.com", "other"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body.pointer("/details/code").and_then(Value::as_str),
        Some("duplicate_email")
    );
}

#[rstest]
#[case(CredentialsRequest { email: None, password: Some("pw".into()) }, "email")]
#[case(CredentialsRequest { email: Some(" ".into()), password: Some("pw".into()) }, "email")]
#[case(CredentialsRequest { email: Some("a@b.c".into()), password: None }, "password")]
#[actix_web::test]
async fn register_requires_both_fields(
    stack: TestStack,
    #[case] payload: CredentialsRequest,
    #[case] field: &str,
) {
    let app = actix_test::init_service(test_app(stack.state.clone())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(payload)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(error_code(&body), Some("invalid_request"));
    assert_eq!(body.pointer("/details/field").and_then(Value::as_str), Some(field));
}

#[rstest]
#[case("nobody@test.com", "pw", StatusCode::NOT_FOUND, "not_found")]
#[case("reader@test.com", "wrong", StatusCode::UNAUTHORIZED, "invalid_credentials")]
#[actix_web::test]
async fn login_failures(
    stack: TestStack,
    #[case] email: &str,
    #[case] password: &str,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    stack
        .seed_user("reader@test.com", "right", Role::Registered)
        .await
        .expect("seed");
    let app = actix_test::init_service(test_app(stack.state.clone())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(credentials(email, password))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), status);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(error_code(&body), Some(code));
}

#[rstest]
#[actix_web::test]
async fn login_issues_an_hour_long_token(stack: TestStack) {
    stack
        .seed_user("reader@test.com", "right", Role::Registered)
        .await
        .expect("seed");
    let app = actix_test::init_service(test_app(stack.state.clone())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(credentials("reader@test.com", "right"))
        .to_request();
    let body: LoginResponse = actix_test::call_and_read_body_json(&app, req).await;
    assert!(!body.token.is_empty());
    assert_eq!(
        body.expires_at,
        stack.clock.utc() + chrono::TimeDelta::seconds(TOKEN_TTL_SECS)
    );
}

#[rstest]
#[actix_web::test]
async fn me_requires_a_token(stack: TestStack) {
    let app = actix_test::init_service(test_app(stack.state.clone())).await;
    let req = actix_test::TestRequest::get().uri("/api/users/me").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(error_code(&body), Some("unauthenticated"));
    assert_eq!(body.get("message").and_then(Value::as_str), Some("No token provided"));
}

#[rstest]
#[actix_web::test]
async fn me_rejects_expired_tokens(stack: TestStack) {
    let user = stack
        .seed_user("reader@test.com", "pw", Role::Registered)
        .await
        .expect("seed");
    let bearer = stack.bearer_for(&user).expect("token");
    stack.clock.advance_seconds(TOKEN_TTL_SECS);

    let app = actix_test::init_service(test_app(stack.state.clone())).await;
    let req = actix_test::TestRequest::get()
        .uri("/api/users/me")
        .insert_header(("Authorization", bearer))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(error_code(&body), Some("invalid_token"));
}

#[rstest]
#[actix_web::test]
async fn preferences_are_replaced_wholesale(stack: TestStack) {
    let user = stack
        .seed_user("reader@test.com", "pw", Role::Registered)
        .await
        .expect("seed");
    let bearer = stack.bearer_for(&user).expect("token");
    let app = actix_test::init_service(test_app(stack.state.clone())).await;

    let req = actix_test::TestRequest::put()
        .uri("/api/users/preferences")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(serde_json::json!({
            "preferences": {"categories": ["Sports", "Technology"], "notifications": false}
        }))
        .to_request();
    let updated: UserResponse = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        updated.preferences,
        Preferences {
            categories: vec!["Sports".to_owned(), "Technology".to_owned()],
            notifications: false,
        }
    );

    let req = actix_test::TestRequest::put()
        .uri("/api/users/preferences")
        .insert_header(("Authorization", bearer))
        .set_json(serde_json::json!({}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn only_admins_list_and_delete_users(stack: TestStack) {
    let admin = stack
        .seed_user("admin@test.com", "pw", Role::Admin)
        .await
        .expect("seed");
    let reader = stack
        .seed_user("reader@test.com", "pw", Role::Registered)
        .await
        .expect("seed");
    let app = actix_test::init_service(test_app(stack.state.clone())).await;

    let req = actix_test::TestRequest::delete()
        .uri(&format!("/api/users/{}", admin.id))
        .insert_header(("Authorization", stack.bearer_for(&reader).expect("token")))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let admin_bearer = stack.bearer_for(&admin).expect("token");
    let req = actix_test::TestRequest::delete()
        .uri(&format!("/api/users/{}", reader.id))
        .insert_header(("Authorization", admin_bearer.clone()))
        .to_request();
    let body: MessageResponse = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.message, "User deleted");

    let req = actix_test::TestRequest::get()
        .uri("/api/users/all")
        .insert_header(("Authorization", admin_bearer))
        .to_request();
    let users: Vec<UserResponse> = actix_test::call_and_read_body_json(&app, req).await;
    let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["admin@test.com"]);
}

#[rstest]
#[actix_web::test]
async fn malformed_user_id_is_not_found(stack: TestStack) {
    let admin = stack
        .seed_user("admin@test.com", "pw", Role::Admin)
        .await
        .expect("seed");
    let app = actix_test::init_service(test_app(stack.state.clone())).await;
    let req = actix_test::TestRequest::delete()
        .uri("/api/users/not-a-uuid")
        .insert_header(("Authorization", stack.bearer_for(&admin).expect("token")))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_register()
        .times(1)
        .return_once(|_| Err(Error::internal("user repository unavailable: refused")));
    let app = actix_test::init_service(test_app(ports.into())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(credentials("a@b.c", "pw"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("Internal server error")
    );
    assert_eq!(error_code(&body), Some("internal_error"));
}
