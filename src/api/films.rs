use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, CreateFilmRequest, PopularQuery, UpdateFilmRequest};
use crate::domain::{FilmId, UserId};
use crate::models::Film;
use crate::state::SharedState;

pub async fn list_films(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<ApiResponse<Vec<Film>>>, ApiError> {
    let films = state.films.list_films().await?;
    Ok(Json(ApiResponse::success(films)))
}

pub async fn get_film(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Film>>, ApiError> {
    let film = state.films.get_film(FilmId::new(id)).await?;
    Ok(Json(ApiResponse::success(film)))
}

pub async fn add_film(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<CreateFilmRequest>,
) -> Result<Json<ApiResponse<Film>>, ApiError> {
    let film = state.films.add_film(payload.into()).await?;
    Ok(Json(ApiResponse::success(film)))
}

pub async fn update_film(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<UpdateFilmRequest>,
) -> Result<Json<ApiResponse<Film>>, ApiError> {
    let (id, payload) = payload.into_parts();
    let film = state.films.update_film(id, payload).await?;
    Ok(Json(ApiResponse::success(film)))
}

pub async fn remove_film(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.films.remove_film(FilmId::new(id)).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn add_like(
    State(state): State<Arc<SharedState>>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<Film>>, ApiError> {
    let film = state
        .films
        .add_like(FilmId::new(id), UserId::new(user_id))
        .await?;
    Ok(Json(ApiResponse::success(film)))
}

pub async fn remove_like(
    State(state): State<Arc<SharedState>>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<Film>>, ApiError> {
    let film = state
        .films
        .remove_like(FilmId::new(id), UserId::new(user_id))
        .await?;
    Ok(Json(ApiResponse::success(film)))
}

pub async fn popular_films(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<PopularQuery>,
) -> Result<Json<ApiResponse<Vec<Film>>>, ApiError> {
    let films = state.films.popular_films(query.count).await?;
    Ok(Json(ApiResponse::success(films)))
}
