//! Domain service for film operations: CRUD, likes and popularity ranking.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{FilmId, GenreId, MpaId, UserId};
use crate::models::Film;
use crate::validation::ValidationError;

/// Domain errors for film operations.
#[derive(Debug, Error)]
pub enum FilmError {
    #[error("Film {0} not found")]
    NotFound(FilmId),

    #[error("User {0} not found")]
    UserNotFound(UserId),

    #[error("Genre {0} not found")]
    GenreNotFound(GenreId),

    #[error("MPA rating {0} not found")]
    MpaNotFound(MpaId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Film '{0}' already exists")]
    Duplicate(String),

    #[error("User {user} already liked film {film}")]
    DuplicateLike { film: FilmId, user: UserId },

    #[error("User {user} has not liked film {film}")]
    LikeNotFound { film: FilmId, user: UserId },

    #[error("Popular film limit must be positive, got {0}")]
    InvalidLimit(i64),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sea_orm::DbErr> for FilmError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<super::CatalogError> for FilmError {
    fn from(err: super::CatalogError) -> Self {
        use super::CatalogError;
        match err {
            CatalogError::GenreNotFound(id) => Self::GenreNotFound(id),
            CatalogError::MpaNotFound(id) => Self::MpaNotFound(id),
            CatalogError::Storage(msg) => Self::Storage(msg),
        }
    }
}

impl From<super::UserError> for FilmError {
    fn from(err: super::UserError) -> Self {
        use super::UserError;
        match err {
            UserError::NotFound(id) => Self::UserNotFound(id),
            UserError::Storage(msg) => Self::Storage(msg),
            other => Self::Storage(other.to_string()),
        }
    }
}

/// Mutable film fields as submitted by a caller. The id, the like set and
/// the resolved genre/MPA names are never part of the payload.
#[derive(Debug, Clone)]
pub struct FilmPayload {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa_id: Option<MpaId>,
    pub genre_ids: Vec<GenreId>,
}

/// Film operations exposed to the HTTP layer.
#[async_trait::async_trait]
pub trait FilmService: Send + Sync {
    /// Lists every film, in ascending id order.
    async fn list_films(&self) -> Result<Vec<Film>, FilmError>;

    async fn get_film(&self, id: FilmId) -> Result<Film, FilmError>;

    /// Validates the payload, resolves genre/MPA references, assigns a fresh
    /// id and stores the film. Duplicate names are rejected.
    async fn add_film(&self, film: FilmPayload) -> Result<Film, FilmError>;

    /// Replaces the mutable fields of an existing film wholesale. The like
    /// set is owned by the like operations and survives the update.
    async fn update_film(&self, id: FilmId, film: FilmPayload) -> Result<Film, FilmError>;

    /// Removes a film along with its likes and genre links.
    async fn remove_film(&self, id: FilmId) -> Result<(), FilmError>;

    /// Records a like from `user` on `film`. Liking the same film twice is
    /// an error.
    async fn add_like(&self, film: FilmId, user: UserId) -> Result<Film, FilmError>;

    /// Withdraws a like. Removing a like that was never given is an error.
    async fn remove_like(&self, film: FilmId, user: UserId) -> Result<Film, FilmError>;

    /// Returns up to `count` films ordered by like count descending.
    ///
    /// # Errors
    ///
    /// Returns [`FilmError::InvalidLimit`] when `count` is zero or negative.
    async fn popular_films(&self, count: i64) -> Result<Vec<Film>, FilmError>;
}

/// Orders films by like count descending and truncates to `count`.
///
/// The sort is stable, so films with equal like counts keep their input
/// order; callers pass id-ordered input to make ties deterministic.
#[must_use]
pub fn rank_by_popularity(mut films: Vec<Film>, count: usize) -> Vec<Film> {
    films.sort_by(|a, b| b.like_count().cmp(&a.like_count()));
    films.truncate(count);
    films
}
