//! In-process fake transport for view and client tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::session::{MemorySessionStore, SessionStore};
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

#[derive(Clone)]
struct Scripted {
    status: u16,
    body: Vec<u8>,
    delay: Duration,
    served: bool,
}

/// Replies from a per-route queue; the last reply on a route repeats until
/// a new one is scripted for that route. Unscripted routes answer 404.
#[derive(Clone, Default)]
pub struct FakeTransport {
    replies: Arc<Mutex<HashMap<(Method, String), VecDeque<Scripted>>>>,
    sent: Arc<Mutex<Vec<ApiRequest>>>,
    pub session: Arc<MemorySessionStore>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(Arc::new(self.clone()), self.session.clone())
    }

    pub fn sign_in(&self, token: &str) {
        self.session.store(token).expect("memory session");
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond_after(method, path, status, body, Duration::ZERO);
    }

    pub fn respond_after(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: Value,
        delay: Duration,
    ) {
        let body = serde_json::to_vec(&body).expect("serialise reply");
        self.push(
            method,
            path,
            Scripted {
                status,
                body,
                delay,
                served: false,
            },
        );
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: Vec<u8>) {
        self.push(
            method,
            path,
            Scripted {
                status,
                body,
                delay: Duration::ZERO,
                served: false,
            },
        );
    }

    fn push(&self, method: Method, path: &str, reply: Scripted) {
        let mut replies = self.replies.lock().unwrap_or_else(PoisonError::into_inner);
        let queue = replies.entry((method, path.to_owned())).or_default();
        // A repeating reply that was already served gives way to the new one.
        if queue.len() == 1 && queue.front().is_some_and(|front| front.served) {
            queue.clear();
        }
        queue.push_back(reply);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.path == path)
            .collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let key = (request.method, request.path.clone());
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        let reply = {
            let mut replies = self.replies.lock().unwrap_or_else(PoisonError::into_inner);
            match replies.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front_mut().map(|front| {
                    front.served = true;
                    front.clone()
                }),
                None => None,
            }
        };
        let Some(reply) = reply else {
            return Ok(ApiResponse {
                status: 404,
                body: br#"{"message":"Route not found"}"#.to_vec(),
            });
        };
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        Ok(ApiResponse {
            status: reply.status,
            body: reply.body,
        })
    }
}

pub fn sample_user(role: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "email": format!("{role}@example.com"),
        "role": role,
        "preferences": { "categories": ["Sports"], "notifications": false },
        "bookmarks": [],
        "createdAt": "2026-01-01T00:00:00Z"
    })
}

pub fn sample_article(title: &str, category: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "title": title,
        "author": "Desk",
        "date": "2026-01-01T00:00:00Z",
        "category": category,
        "tags": [],
        "content": "Body",
        "comments": [],
        "createdAt": "2026-01-01T00:00:00Z"
    })
}

pub fn sample_category(name: &str) -> Value {
    json!({ "id": Uuid::new_v4(), "name": name, "description": "" })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    async fn status_of(fake: &FakeTransport, method: Method, path: &str) -> u16 {
        fake.send(ApiRequest::new(method, path))
            .await
            .expect("fake transport never fails")
            .status
    }

    #[rstest]
    #[tokio::test]
    async fn queued_replies_are_served_in_order_and_the_last_repeats() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/api/comments", 500, json!({}));
        fake.respond(Method::Get, "/api/comments", 200, json!([]));

        assert_eq!(status_of(&fake, Method::Get, "/api/comments").await, 500);
        assert_eq!(status_of(&fake, Method::Get, "/api/comments").await, 200);
        assert_eq!(status_of(&fake, Method::Get, "/api/comments").await, 200);
    }

    #[rstest]
    #[tokio::test]
    async fn scripting_after_a_served_reply_replaces_it() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/api/comments", 200, json!([]));
        assert_eq!(status_of(&fake, Method::Get, "/api/comments").await, 200);

        fake.respond(Method::Get, "/api/comments", 503, json!({}));
        assert_eq!(status_of(&fake, Method::Get, "/api/comments").await, 503);
        assert_eq!(status_of(&fake, Method::Get, "/api/comments").await, 503);
    }

    #[rstest]
    #[tokio::test]
    async fn unserved_replies_are_kept_when_more_are_scripted() {
        let fake = FakeTransport::new();
        fake.respond(Method::Put, "/api/articles/1", 200, json!({}));
        fake.respond(Method::Put, "/api/articles/1", 404, json!({}));

        assert_eq!(status_of(&fake, Method::Put, "/api/articles/1").await, 200);
        assert_eq!(status_of(&fake, Method::Put, "/api/articles/1").await, 404);
        assert_eq!(status_of(&fake, Method::Get, "/api/unknown").await, 404);
    }
}
