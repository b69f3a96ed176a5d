use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::{CatalogError, FilmError, UserError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    DatabaseError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<FilmError> for ApiError {
    fn from(err: FilmError) -> Self {
        match err {
            FilmError::NotFound(_)
            | FilmError::UserNotFound(_)
            | FilmError::GenreNotFound(_)
            | FilmError::MpaNotFound(_) => Self::NotFound(err.to_string()),
            FilmError::Validation(_)
            | FilmError::Duplicate(_)
            | FilmError::DuplicateLike { .. }
            | FilmError::LikeNotFound { .. }
            | FilmError::InvalidLimit(_) => Self::ValidationError(err.to_string()),
            FilmError::Storage(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => Self::NotFound(err.to_string()),
            UserError::Validation(_)
            | UserError::Duplicate(_)
            | UserError::DuplicateFriendship { .. }
            | UserError::FriendshipNotFound { .. } => Self::ValidationError(err.to_string()),
            UserError::Storage(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::GenreNotFound(_) | CatalogError::MpaNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            CatalogError::Storage(msg) => Self::DatabaseError(msg),
        }
    }
}
