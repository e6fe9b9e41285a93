//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` against a migrated database when the schema changes.

diesel::table! {
    /// Accounts. `email` carries a unique constraint (`users_email_key`).
    users (id) {
        id -> Uuid,
        email -> Text,
        /// PHC-formatted Argon2 digest.
        password_hash -> Text,
        /// One of `guest`, `registered`, `editor`, `admin`.
        role -> Text,
        /// `{categories: [string], notifications: bool}`.
        preferences -> Jsonb,
        bookmarks -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published articles.
    articles (id) {
        id -> Uuid,
        title -> Text,
        author -> Text,
        /// Display date; defaults to creation time.
        published_at -> Timestamptz,
        category -> Text,
        tags -> Array<Text>,
        content -> Text,
        featured_image -> Nullable<Text>,
        seo -> Nullable<Jsonb>,
        /// Append-only back-references to `comments.id`.
        comment_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reader comments.
    comments (id) {
        id -> Uuid,
        article_id -> Uuid,
        user_id -> Uuid,
        content -> Text,
        posted_at -> Timestamptz,
        approved -> Bool,
    }
}

diesel::table! {
    categories (id) {
        id -> Uuid,
        name -> Text,
        description -> Text,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, articles, comments, categories);
