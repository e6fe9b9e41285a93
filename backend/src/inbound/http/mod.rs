//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every API route lives under `/api`; [`configure_api`] registers them along
//! with the JSON extractor settings so the server and tests share one route
//! table.

use actix_web::web;

pub mod articles;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;

/// Register the `/api` scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use newsroom::inbound::http::{configure_api, validation::route_not_found};
///
/// let _app = App::new()
///     .configure(configure_api)
///     .default_service(web::to(route_not_found));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config()).service(
        web::scope("/api")
            .service(
                web::scope("/users")
                    .service(users::register)
                    .service(users::login)
                    .service(users::current_user)
                    .service(users::update_preferences)
                    .service(users::list_users)
                    .service(users::delete_user),
            )
            .service(
                web::scope("/articles")
                    .service(articles::list_articles)
                    .service(articles::create_article)
                    .service(articles::get_article)
                    .service(articles::update_article)
                    .service(articles::delete_article),
            )
            .service(
                web::scope("/comments")
                    .service(comments::create_comment)
                    .service(comments::list_comments)
                    .service(comments::approve_comment),
            )
            .service(
                web::scope("/categories")
                    .service(categories::list_categories)
                    .service(categories::create_category),
            ),
    );
}
