//! Film domain model plus the genre/MPA reference types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use crate::domain::{FilmId, GenreId, MpaId, UserId};

/// A film tracked by the service.
///
/// `likes` is the set of users who liked the film; it is mutated only through
/// the like operations on the film service, never via create/update payloads.
/// `genres` is kept sorted by genre id and free of duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: FilmId,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    /// Running time in minutes.
    pub duration: i32,
    #[serde(default)]
    pub mpa: Option<MpaRating>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub likes: BTreeSet<UserId>,
}

impl Film {
    /// Sorts the genre list by id and drops duplicate references.
    pub fn normalize_genres(&mut self) {
        self.genres.sort();
        self.genres.dedup_by_key(|g| g.id);
    }

    #[must_use]
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

/// Genre reference data. Identity is the id alone; two `Genre` values with
/// the same id compare equal regardless of name.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl PartialEq for Genre {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Genre {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Genre {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Genre {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

/// MPA content rating reference data (G, PG, PG-13, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpaRating {
    pub id: MpaId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(id: i32, name: &str) -> Genre {
        Genre {
            id: GenreId::new(id),
            name: name.to_string(),
        }
    }

    #[test]
    fn genre_identity_ignores_name() {
        assert_eq!(genre(1, "Comedy"), genre(1, "comedy?"));
        assert_ne!(genre(1, "Comedy"), genre(2, "Comedy"));
    }

    #[test]
    fn normalize_genres_sorts_and_dedups() {
        let mut film = Film {
            id: FilmId::new(1),
            name: "Matrix".to_string(),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
            duration: 136,
            mpa: None,
            genres: vec![genre(4, "Thriller"), genre(6, "Action"), genre(4, "Thriller")],
            likes: BTreeSet::new(),
        };
        film.normalize_genres();
        let ids: Vec<i32> = film.genres.iter().map(|g| g.id.value()).collect();
        assert_eq!(ids, vec![4, 6]);
    }
}
