//! HTTP surface: router, request/response types and error mapping.

use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

mod catalogs;
mod error;
mod films;
mod types;
mod users;

pub use error::ApiError;
pub use types::*;

pub fn router(state: Arc<SharedState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/films", get(films::list_films))
        .route("/films", post(films::add_film))
        .route("/films", put(films::update_film))
        .route("/films/popular", get(films::popular_films))
        .route("/films/{id}", get(films::get_film))
        .route("/films/{id}", delete(films::remove_film))
        .route("/films/{id}/like/{user_id}", put(films::add_like))
        .route("/films/{id}/like/{user_id}", delete(films::remove_like))
        .route("/users", get(users::list_users))
        .route("/users", post(users::create_user))
        .route("/users", put(users::update_user))
        .route("/users/{id}", get(users::get_user))
        .route("/users/{id}", delete(users::remove_user))
        .route("/users/{id}/friends", get(users::list_friends))
        .route("/users/{id}/friends/{friend_id}", put(users::add_friend))
        .route(
            "/users/{id}/friends/{friend_id}",
            delete(users::remove_friend),
        )
        .route(
            "/users/{id}/friends/common/{other_id}",
            get(users::mutual_friends),
        )
        .route("/genres", get(catalogs::list_genres))
        .route("/genres/{id}", get(catalogs::get_genre))
        .route("/mpa", get(catalogs::list_mpa_ratings))
        .route("/mpa/{id}", get(catalogs::get_mpa_rating))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
