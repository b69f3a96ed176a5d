//! Read-only lookups over the genre and MPA rating reference catalogs.

use thiserror::Error;

use crate::domain::{GenreId, MpaId};
use crate::models::{Genre, MpaRating};

/// Errors for reference-data lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Genre {0} not found")]
    GenreNotFound(GenreId),

    #[error("MPA rating {0} not found")]
    MpaNotFound(MpaId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Storage(err.to_string())
    }
}

/// The genre catalog every backend starts from. The database backend seeds
/// these rows in its initial migration; the in-memory backend holds them
/// directly.
#[must_use]
pub fn default_genres() -> Vec<Genre> {
    [
        (1, "Comedy"),
        (2, "Drama"),
        (3, "Cartoon"),
        (4, "Thriller"),
        (5, "Documentary"),
        (6, "Action"),
    ]
    .into_iter()
    .map(|(id, name)| Genre {
        id: GenreId::new(id),
        name: name.to_string(),
    })
    .collect()
}

/// The MPA rating catalog every backend starts from.
#[must_use]
pub fn default_mpa_ratings() -> Vec<MpaRating> {
    [(1, "G"), (2, "PG"), (3, "PG-13"), (4, "R"), (5, "NC-17")]
        .into_iter()
        .map(|(id, name)| MpaRating {
            id: MpaId::new(id),
            name: name.to_string(),
        })
        .collect()
}

/// Reference-catalog lookups. The catalogs are seeded once and never mutated
/// by the application.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_genres(&self) -> Result<Vec<Genre>, CatalogError>;

    async fn get_genre(&self, id: GenreId) -> Result<Genre, CatalogError>;

    async fn list_mpa_ratings(&self) -> Result<Vec<MpaRating>, CatalogError>;

    async fn get_mpa_rating(&self, id: MpaId) -> Result<MpaRating, CatalogError>;
}
