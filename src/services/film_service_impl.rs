//! Store-backed implementation of the [`FilmService`] trait.
//!
//! Works against any [`FilmStore`]/[`UserStore`]/[`CatalogStore`] trio, so
//! the same service drives both the in-memory and the relational backend.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{FilmId, UserId};
use crate::models::Film;
use crate::services::film_service::{FilmError, FilmPayload, FilmService, rank_by_popularity};
use crate::storage::{CatalogStore, FilmStore, UserStore};

pub struct StoreFilmService {
    films: Arc<dyn FilmStore>,
    users: Arc<dyn UserStore>,
    catalogs: Arc<dyn CatalogStore>,
}

impl StoreFilmService {
    #[must_use]
    pub fn new(
        films: Arc<dyn FilmStore>,
        users: Arc<dyn UserStore>,
        catalogs: Arc<dyn CatalogStore>,
    ) -> Self {
        Self {
            films,
            users,
            catalogs,
        }
    }

    /// Turns a payload into a domain film, resolving genre and MPA ids
    /// against the catalogs. Unknown references fail before any write.
    async fn resolve(&self, id: FilmId, payload: FilmPayload) -> Result<Film, FilmError> {
        let mpa = match payload.mpa_id {
            Some(mpa_id) => Some(self.catalogs.mpa_rating(mpa_id).await?),
            None => None,
        };

        let mut genres = Vec::with_capacity(payload.genre_ids.len());
        for genre_id in payload.genre_ids {
            genres.push(self.catalogs.genre(genre_id).await?);
        }

        let mut film = Film {
            id,
            name: payload.name,
            description: payload.description,
            release_date: payload.release_date,
            duration: payload.duration,
            mpa,
            genres,
            likes: BTreeSet::new(),
        };
        film.normalize_genres();
        Ok(film)
    }
}

#[async_trait::async_trait]
impl FilmService for StoreFilmService {
    async fn list_films(&self) -> Result<Vec<Film>, FilmError> {
        self.films.get_all().await
    }

    async fn get_film(&self, id: FilmId) -> Result<Film, FilmError> {
        self.films.find_by_id(id).await
    }

    async fn add_film(&self, film: FilmPayload) -> Result<Film, FilmError> {
        let film = self.resolve(FilmId::default(), film).await?;
        self.films.add(film).await
    }

    async fn update_film(&self, id: FilmId, film: FilmPayload) -> Result<Film, FilmError> {
        let film = self.resolve(id, film).await?;
        self.films.update(film).await
    }

    async fn remove_film(&self, id: FilmId) -> Result<(), FilmError> {
        self.films.remove(id).await
    }

    async fn add_like(&self, film: FilmId, user: UserId) -> Result<Film, FilmError> {
        self.users.find_by_id(user).await?;
        self.films.add_like(film, user).await?;
        self.films.find_by_id(film).await
    }

    async fn remove_like(&self, film: FilmId, user: UserId) -> Result<Film, FilmError> {
        self.users.find_by_id(user).await?;
        self.films.remove_like(film, user).await?;
        self.films.find_by_id(film).await
    }

    async fn popular_films(&self, count: i64) -> Result<Vec<Film>, FilmError> {
        if count <= 0 {
            return Err(FilmError::InvalidLimit(count));
        }
        let films = self.films.get_all().await?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(rank_by_popularity(films, count as usize))
    }
}
