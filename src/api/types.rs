use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{FilmId, GenreId, MpaId, UserId};
use crate::services::{FilmPayload, UserPayload};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Reference to a catalog genre by id; the name is resolved server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreRef {
    pub id: GenreId,
}

/// Reference to an MPA rating by id; the name is resolved server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct MpaRef {
    pub id: MpaId,
}

#[derive(Debug, Deserialize)]
pub struct CreateFilmRequest {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    #[serde(default)]
    pub mpa: Option<MpaRef>,
    #[serde(default)]
    pub genres: Vec<GenreRef>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFilmRequest {
    pub id: FilmId,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    #[serde(default)]
    pub mpa: Option<MpaRef>,
    #[serde(default)]
    pub genres: Vec<GenreRef>,
}

impl From<CreateFilmRequest> for FilmPayload {
    fn from(req: CreateFilmRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            release_date: req.release_date,
            duration: req.duration,
            mpa_id: req.mpa.map(|m| m.id),
            genre_ids: req.genres.into_iter().map(|g| g.id).collect(),
        }
    }
}

impl UpdateFilmRequest {
    pub fn into_parts(self) -> (FilmId, FilmPayload) {
        (
            self.id,
            FilmPayload {
                name: self.name,
                description: self.description,
                release_date: self.release_date,
                duration: self.duration,
                mpa_id: self.mpa.map(|m| m.id),
                genre_ids: self.genres.into_iter().map(|g| g.id).collect(),
            },
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub login: String,
    #[serde(default)]
    pub name: String,
    pub birthday: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub id: UserId,
    pub email: String,
    pub login: String,
    #[serde(default)]
    pub name: String,
    pub birthday: NaiveDate,
}

impl From<CreateUserRequest> for UserPayload {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            email: req.email,
            login: req.login,
            name: req.name,
            birthday: req.birthday,
        }
    }
}

impl UpdateUserRequest {
    pub fn into_parts(self) -> (UserId, UserPayload) {
        (
            self.id,
            UserPayload {
                email: self.email,
                login: self.login,
                name: self.name,
                birthday: self.birthday,
            },
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    #[serde(default = "default_popular_count")]
    pub count: i64,
}

const fn default_popular_count() -> i64 {
    10
}
