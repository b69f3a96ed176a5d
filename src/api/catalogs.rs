use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse};
use crate::domain::{GenreId, MpaId};
use crate::models::{Genre, MpaRating};
use crate::state::SharedState;

pub async fn list_genres(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<ApiResponse<Vec<Genre>>>, ApiError> {
    let genres = state.catalogs.list_genres().await?;
    Ok(Json(ApiResponse::success(genres)))
}

pub async fn get_genre(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Genre>>, ApiError> {
    let genre = state.catalogs.get_genre(GenreId::new(id)).await?;
    Ok(Json(ApiResponse::success(genre)))
}

pub async fn list_mpa_ratings(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<ApiResponse<Vec<MpaRating>>>, ApiError> {
    let ratings = state.catalogs.list_mpa_ratings().await?;
    Ok(Json(ApiResponse::success(ratings)))
}

pub async fn get_mpa_rating(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MpaRating>>, ApiError> {
    let rating = state.catalogs.get_mpa_rating(MpaId::new(id)).await?;
    Ok(Json(ApiResponse::success(rating)))
}
