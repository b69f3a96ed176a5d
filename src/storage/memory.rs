//! In-memory storage backend.
//!
//! Each store guards its aggregate with a single `RwLock`, so every
//! operation, including the symmetric friendship pair-write, is atomic with
//! respect to other callers. Ids come from a per-store allocator that lives
//! inside the lock.

use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use crate::domain::{FilmId, GenreId, MpaId, UserId};
use crate::models::{Film, Genre, MpaRating, User};
use crate::services::catalog_service::{default_genres, default_mpa_ratings};
use crate::services::{CatalogError, FilmError, UserError};
use crate::validation;

use super::{CatalogStore, FilmStore, UserStore};

/// Monotonic id source, one per store instance. Starts handing out 1.
#[derive(Debug, Default)]
struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    fn allocate(&mut self) -> i64 {
        self.last += 1;
        self.last
    }
}

#[derive(Debug, Default)]
struct FilmState {
    ids: IdAllocator,
    films: BTreeMap<FilmId, Film>,
}

/// Map-backed [`FilmStore`].
#[derive(Debug, Default)]
pub struct MemoryFilmStore {
    inner: RwLock<FilmState>,
}

impl MemoryFilmStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl FilmStore for MemoryFilmStore {
    async fn add(&self, mut film: Film) -> Result<Film, FilmError> {
        validation::validate_film(&film)?;
        let mut state = self.inner.write().await;
        if state.films.values().any(|f| f.name == film.name) {
            return Err(FilmError::Duplicate(film.name));
        }
        film.id = FilmId::new(state.ids.allocate());
        film.likes = BTreeSet::new();
        film.normalize_genres();
        tracing::info!("Added film {} '{}'", film.id, film.name);
        state.films.insert(film.id, film.clone());
        Ok(film)
    }

    async fn update(&self, mut film: Film) -> Result<Film, FilmError> {
        validation::validate_film(&film)?;
        let mut state = self.inner.write().await;
        if state
            .films
            .values()
            .any(|f| f.id != film.id && f.name == film.name)
        {
            return Err(FilmError::Duplicate(film.name));
        }
        let Some(existing) = state.films.get(&film.id) else {
            return Err(FilmError::NotFound(film.id));
        };
        film.likes = existing.likes.clone();
        film.normalize_genres();
        tracing::info!("Updated film {}", film.id);
        state.films.insert(film.id, film.clone());
        Ok(film)
    }

    async fn remove(&self, id: FilmId) -> Result<(), FilmError> {
        let mut state = self.inner.write().await;
        if state.films.remove(&id).is_none() {
            return Err(FilmError::NotFound(id));
        }
        tracing::info!("Removed film {}", id);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Film>, FilmError> {
        let state = self.inner.read().await;
        Ok(state.films.values().cloned().collect())
    }

    async fn find_by_id(&self, id: FilmId) -> Result<Film, FilmError> {
        let state = self.inner.read().await;
        state.films.get(&id).cloned().ok_or(FilmError::NotFound(id))
    }

    async fn add_like(&self, id: FilmId, user: UserId) -> Result<(), FilmError> {
        let mut state = self.inner.write().await;
        let film = state.films.get_mut(&id).ok_or(FilmError::NotFound(id))?;
        if !film.likes.insert(user) {
            return Err(FilmError::DuplicateLike { film: id, user });
        }
        tracing::info!("User {} liked film {}", user, id);
        Ok(())
    }

    async fn remove_like(&self, id: FilmId, user: UserId) -> Result<(), FilmError> {
        let mut state = self.inner.write().await;
        let film = state.films.get_mut(&id).ok_or(FilmError::NotFound(id))?;
        if !film.likes.remove(&user) {
            return Err(FilmError::LikeNotFound { film: id, user });
        }
        tracing::info!("User {} unliked film {}", user, id);
        Ok(())
    }

    async fn remove_likes_by_user(&self, user: UserId) -> Result<(), FilmError> {
        let mut state = self.inner.write().await;
        for film in state.films.values_mut() {
            film.likes.remove(&user);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct UserState {
    ids: IdAllocator,
    users: BTreeMap<UserId, User>,
}

/// Map-backed [`UserStore`].
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    inner: RwLock<UserState>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryUserStore {
    async fn add(&self, mut user: User) -> Result<User, UserError> {
        validation::validate_user(&user)?;
        let mut state = self.inner.write().await;
        if state.users.values().any(|u| u.login == user.login) {
            return Err(UserError::Duplicate(user.login));
        }
        validation::fill_default_display_name(&mut user);
        user.id = UserId::new(state.ids.allocate());
        user.friends = BTreeSet::new();
        tracing::info!("Registered user {} '{}'", user.id, user.login);
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, mut user: User) -> Result<User, UserError> {
        validation::validate_user(&user)?;
        let mut state = self.inner.write().await;
        if state
            .users
            .values()
            .any(|u| u.id != user.id && u.login == user.login)
        {
            return Err(UserError::Duplicate(user.login));
        }
        let Some(existing) = state.users.get(&user.id) else {
            return Err(UserError::NotFound(user.id));
        };
        validation::fill_default_display_name(&mut user);
        user.friends = existing.friends.clone();
        tracing::info!("Updated user {}", user.id);
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn remove(&self, id: UserId) -> Result<(), UserError> {
        let mut state = self.inner.write().await;
        if state.users.remove(&id).is_none() {
            return Err(UserError::NotFound(id));
        }
        tracing::info!("Removed user {}", id);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<User>, UserError> {
        let state = self.inner.read().await;
        Ok(state.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserError> {
        let state = self.inner.read().await;
        state.users.get(&id).cloned().ok_or(UserError::NotFound(id))
    }

    async fn add_friendship(&self, user: UserId, friend: UserId) -> Result<(), UserError> {
        let mut state = self.inner.write().await;
        if !state.users.contains_key(&user) {
            return Err(UserError::NotFound(user));
        }
        if !state.users.contains_key(&friend) {
            return Err(UserError::NotFound(friend));
        }
        if state.users[&user].friends.contains(&friend) {
            return Err(UserError::DuplicateFriendship { user, friend });
        }
        // Both directions under the same lock, so the pair-write is atomic.
        if let Some(u) = state.users.get_mut(&user) {
            u.friends.insert(friend);
        }
        if let Some(f) = state.users.get_mut(&friend) {
            f.friends.insert(user);
        }
        tracing::info!("Users {} and {} are now friends", user, friend);
        Ok(())
    }

    async fn remove_friendship(&self, user: UserId, friend: UserId) -> Result<(), UserError> {
        let mut state = self.inner.write().await;
        if !state.users.contains_key(&user) {
            return Err(UserError::NotFound(user));
        }
        if !state.users.contains_key(&friend) {
            return Err(UserError::NotFound(friend));
        }
        if !state.users[&user].friends.contains(&friend) {
            return Err(UserError::FriendshipNotFound { user, friend });
        }
        if let Some(u) = state.users.get_mut(&user) {
            u.friends.remove(&friend);
        }
        if let Some(f) = state.users.get_mut(&friend) {
            f.friends.remove(&user);
        }
        tracing::info!("Users {} and {} are no longer friends", user, friend);
        Ok(())
    }

    async fn friend_ids(&self, id: UserId) -> Result<BTreeSet<UserId>, UserError> {
        let state = self.inner.read().await;
        state
            .users
            .get(&id)
            .map(|u| u.friends.clone())
            .ok_or(UserError::NotFound(id))
    }
}

/// Seeded, read-only [`CatalogStore`].
#[derive(Debug)]
pub struct MemoryCatalogStore {
    genres: Vec<Genre>,
    mpa_ratings: Vec<MpaRating>,
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self {
            genres: default_genres(),
            mpa_ratings: default_mpa_ratings(),
        }
    }
}

impl MemoryCatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        Ok(self.genres.clone())
    }

    async fn genre(&self, id: GenreId) -> Result<Genre, CatalogError> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or(CatalogError::GenreNotFound(id))
    }

    async fn mpa_ratings(&self) -> Result<Vec<MpaRating>, CatalogError> {
        Ok(self.mpa_ratings.clone())
    }

    async fn mpa_rating(&self, id: MpaId) -> Result<MpaRating, CatalogError> {
        self.mpa_ratings
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(CatalogError::MpaNotFound(id))
    }
}
