//! Storage contracts for films, users and the reference catalogs.
//!
//! One trait per aggregate with two interchangeable implementations: the
//! in-memory backend in [`memory`] and the relational backend in
//! [`crate::db::repositories`]. Services hold `Arc<dyn …>` handles and never
//! know which backend is underneath.

pub mod memory;

use std::collections::BTreeSet;

use crate::domain::{FilmId, GenreId, MpaId, UserId};
use crate::models::{Film, Genre, MpaRating, User};
use crate::services::{CatalogError, FilmError, UserError};

pub use memory::{MemoryCatalogStore, MemoryFilmStore, MemoryUserStore};

/// Film persistence. Mutating calls validate before writing; a failed call
/// leaves the store unchanged.
#[async_trait::async_trait]
pub trait FilmStore: Send + Sync {
    /// Validates the film, rejects duplicate names, assigns the next id and
    /// stores it. The id on the incoming value is ignored.
    async fn add(&self, film: Film) -> Result<Film, FilmError>;

    /// Re-validates and replaces the stored film's fields wholesale. The
    /// stored like set is preserved; the incoming one is ignored. Renaming
    /// to another film's name is rejected as a duplicate.
    async fn update(&self, film: Film) -> Result<Film, FilmError>;

    async fn remove(&self, id: FilmId) -> Result<(), FilmError>;

    /// All films in ascending id order.
    async fn get_all(&self) -> Result<Vec<Film>, FilmError>;

    async fn find_by_id(&self, id: FilmId) -> Result<Film, FilmError>;

    /// Records a like; fails when the pair already exists.
    async fn add_like(&self, id: FilmId, user: UserId) -> Result<(), FilmError>;

    /// Removes a like; fails when the pair does not exist.
    async fn remove_like(&self, id: FilmId, user: UserId) -> Result<(), FilmError>;

    /// Drops every like a user has given, across all films.
    async fn remove_likes_by_user(&self, user: UserId) -> Result<(), FilmError>;
}

/// User persistence. Friendship writes are symmetric: both directions are
/// stored and dropped as one logical operation.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Validates the user, rejects duplicate logins, fills a blank display
    /// name from the login, assigns the next id and stores it.
    async fn add(&self, user: User) -> Result<User, UserError>;

    /// Re-validates and replaces the stored user's fields wholesale. The
    /// stored friend set is preserved; the incoming one is ignored. Taking
    /// over another user's login is rejected as a duplicate.
    async fn update(&self, user: User) -> Result<User, UserError>;

    async fn remove(&self, id: UserId) -> Result<(), UserError>;

    /// All users in ascending id order.
    async fn get_all(&self) -> Result<Vec<User>, UserError>;

    async fn find_by_id(&self, id: UserId) -> Result<User, UserError>;

    /// Writes the symmetric friendship pair; fails when it already exists.
    async fn add_friendship(&self, user: UserId, friend: UserId) -> Result<(), UserError>;

    /// Drops the symmetric friendship pair; fails when it does not exist.
    async fn remove_friendship(&self, user: UserId, friend: UserId) -> Result<(), UserError>;

    async fn friend_ids(&self, id: UserId) -> Result<BTreeSet<UserId>, UserError>;
}

/// Read-only genre/MPA reference data, seeded at startup.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    async fn genres(&self) -> Result<Vec<Genre>, CatalogError>;

    async fn genre(&self, id: GenreId) -> Result<Genre, CatalogError>;

    async fn mpa_ratings(&self) -> Result<Vec<MpaRating>, CatalogError>;

    async fn mpa_rating(&self, id: MpaId) -> Result<MpaRating, CatalogError>;
}
