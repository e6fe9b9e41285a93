//! Admin panel: user management, publishing and comment moderation.
//!
//! Sections depend on the signed-in role. Editors publish and moderate;
//! admins additionally manage users and categories. The server enforces the
//! same rules, so hiding a section is a convenience only.

use uuid::Uuid;

use super::{AuthContext, Shared};
use crate::models::{
    ArticleDetail, ArticleDraft, ArticleFilter, Category, CategoryDraft, CommentListing, Role,
    Seo, User,
};
use crate::{ApiClient, ClientError};

const LOAD_FAILED: &str = "Failed to load data";
const DELETE_USER_FAILED: &str = "Failed to delete user";
const APPROVE_FAILED: &str = "Failed to approve comment";
const CREATE_ARTICLE_FAILED: &str = "Failed to create article";
const CREATE_CATEGORY_FAILED: &str = "Failed to create category";

/// Whether the panel may be shown, and to whom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminAccess {
    /// Not decided yet; [`AdminPanelView::load`] has not run.
    #[default]
    Pending,
    /// Nobody is signed in.
    SignInRequired,
    /// Signed in without a staff role.
    Denied,
    /// A staff member is signed in.
    Granted {
        /// The staff member's role.
        role: Role,
    },
}

impl AdminAccess {
    fn role(self) -> Option<Role> {
        match self {
            Self::Granted { role } => Some(role),
            _ => None,
        }
    }

    /// User management is for admins.
    pub fn shows_users(self) -> bool {
        self.role().is_some_and(Role::is_admin)
    }

    /// Editors and admins publish.
    pub fn shows_article_form(self) -> bool {
        self.role().is_some_and(Role::is_staff)
    }

    /// Categories are managed by admins.
    pub fn shows_category_form(self) -> bool {
        self.role().is_some_and(Role::is_admin)
    }

    /// Editors and admins moderate.
    pub fn shows_moderation(self) -> bool {
        self.role().is_some_and(Role::is_staff)
    }
}

/// One line of the user table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    /// The account shown.
    pub user: User,
    /// Admin accounts cannot be deleted from the table.
    pub deletable: bool,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        let deletable = !user.role.is_admin();
        Self { user, deletable }
    }
}

/// Everything the admin panel renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminPanelState {
    /// Which sections are visible.
    pub access: AdminAccess,
    /// Accounts; empty unless the caller is an admin.
    pub users: Vec<UserRow>,
    /// Every article, newest first.
    pub articles: Vec<ArticleDetail>,
    /// Every category.
    pub categories: Vec<Category>,
    /// The moderation queue.
    pub comments: Vec<CommentListing>,
    /// Inline error from the last failed action.
    pub error: Option<String>,
}

/// Article form as typed. List fields are comma separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleForm {
    /// Headline.
    pub title: String,
    /// Byline.
    pub author: String,
    /// Selected category name.
    pub category: String,
    /// Comma separated tags.
    pub tags: String,
    /// Body text.
    pub content: String,
    /// Hero image URL; blank for none.
    pub featured_image: String,
    /// SEO title; blank for none.
    pub seo_title: String,
    /// SEO description; blank for none.
    pub seo_description: String,
    /// Comma separated SEO keywords.
    pub seo_keywords: String,
}

impl ArticleForm {
    /// Trim the text fields and split the lists. SEO is omitted when every
    /// SEO field is blank.
    pub fn to_draft(&self) -> ArticleDraft {
        let seo = Seo {
            title: non_blank(&self.seo_title),
            description: non_blank(&self.seo_description),
            keywords: split_list(&self.seo_keywords),
        };
        let has_seo = seo != Seo::default();
        ArticleDraft {
            title: self.title.trim().to_owned(),
            author: self.author.trim().to_owned(),
            category: self.category.clone(),
            tags: split_list(&self.tags),
            content: self.content.clone(),
            featured_image: non_blank(&self.featured_image),
            seo: has_seo.then_some(seo),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Admin panel backed by the shared session.
pub struct AdminPanelView {
    auth: AuthContext,
    state: Shared<AdminPanelState>,
}

impl AdminPanelView {
    /// A panel in the [`AdminAccess::Pending`] state.
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            state: Shared::default(),
        }
    }

    fn client(&self) -> &ApiClient {
        self.auth.client()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AdminPanelState {
        self.state.snapshot()
    }

    /// Decide access from the session user, then load the panel data.
    pub async fn load(&self) {
        let access = match self.auth.user() {
            None => AdminAccess::SignInRequired,
            Some(user) if user.role.is_staff() => AdminAccess::Granted { role: user.role },
            Some(_) => AdminAccess::Denied,
        };
        self.state.update(|state| state.access = access);
        if access.role().is_some() {
            self.reload().await;
        }
    }

    /// Refetch articles, categories and comments, plus users for admins.
    pub async fn reload(&self) {
        let access = self.state.update(|state| state.access);
        let client = self.client();
        let filter = ArticleFilter::default();
        let (articles, categories, comments) = tokio::join!(
            client.list_articles(&filter),
            client.list_categories(),
            client.list_comments(),
        );
        let users = if access.shows_users() {
            Some(client.list_users().await)
        } else {
            None
        };
        self.state.update(|state| {
            let mut failed = false;
            match articles {
                Ok(articles) => state.articles = articles,
                Err(_) => failed = true,
            }
            match categories {
                Ok(categories) => state.categories = categories,
                Err(_) => failed = true,
            }
            match comments {
                Ok(comments) => state.comments = comments,
                Err(_) => failed = true,
            }
            match users {
                Some(Ok(users)) => state.users = users.into_iter().map(UserRow::from).collect(),
                Some(Err(_)) => failed = true,
                None => state.users.clear(),
            }
            if failed {
                state.error = Some(LOAD_FAILED.to_owned());
            }
        });
    }

    /// Delete an account and drop its row without a refetch.
    pub async fn delete_user(&self, id: Uuid) {
        match self.client().delete_user(id).await {
            Ok(_) => self
                .state
                .update(|state| state.users.retain(|row| row.user.id != id)),
            Err(error) => self.fail(&error, DELETE_USER_FAILED),
        }
    }

    /// Approve a comment, then reload the panel.
    pub async fn approve_comment(&self, id: Uuid) {
        match self.client().approve_comment(id).await {
            Ok(_) => self.reload().await,
            Err(error) => self.fail(&error, APPROVE_FAILED),
        }
    }

    /// Publish the form's article. Returns whether it was created, so the
    /// caller can reset the form.
    pub async fn create_article(&self, form: &ArticleForm) -> bool {
        match self.client().create_article(&form.to_draft()).await {
            Ok(_) => {
                self.reload().await;
                true
            }
            Err(error) => {
                self.fail(&error, CREATE_ARTICLE_FAILED);
                false
            }
        }
    }

    /// Create a category. Returns whether it was created.
    pub async fn create_category(&self, draft: &CategoryDraft) -> bool {
        match self.client().create_category(draft).await {
            Ok(_) => {
                self.reload().await;
                true
            }
            Err(error) => {
                self.fail(&error, CREATE_CATEGORY_FAILED);
                false
            }
        }
    }

    fn fail(&self, error: &ClientError, fallback: &str) {
        let message = error.inline_message(fallback);
        self.state.update(|state| state.error = Some(message));
    }
}
