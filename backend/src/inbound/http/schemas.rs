//! Response bodies shared by several handler modules.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ArticleSummary, UserSummary};

/// Acknowledgement body for deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Article deleted")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public reference to a user: id and, when resolved, email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "reader@example.com")]
    pub email: Option<String>,
}

impl From<&UserSummary> for UserRef {
    fn from(summary: &UserSummary) -> Self {
        Self {
            id: *summary.id.as_uuid(),
            email: Some(summary.email.to_string()),
        }
    }
}

/// Public reference to an article: id and title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRef {
    pub id: Uuid,
    pub title: String,
}

impl From<&ArticleSummary> for ArticleRef {
    fn from(summary: &ArticleSummary) -> Self {
        Self {
            id: *summary.id.as_uuid(),
            title: summary.title.clone(),
        }
    }
}
