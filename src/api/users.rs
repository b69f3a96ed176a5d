use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, CreateUserRequest, UpdateUserRequest};
use crate::domain::UserId;
use crate::models::User;
use crate::state::SharedState;

pub async fn list_users(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.users.list_users().await?;
    Ok(Json(ApiResponse::success(users)))
}

pub async fn get_user(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.users.get_user(UserId::new(id)).await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn create_user(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.users.create_user(payload.into()).await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn update_user(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let (id, payload) = payload.into_parts();
    let user = state.users.update_user(id, payload).await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn remove_user(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.users.remove_user(UserId::new(id)).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn add_friend(
    State(state): State<Arc<SharedState>>,
    Path((id, friend_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state
        .users
        .add_friend(UserId::new(id), UserId::new(friend_id))
        .await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn remove_friend(
    State(state): State<Arc<SharedState>>,
    Path((id, friend_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state
        .users
        .remove_friend(UserId::new(id), UserId::new(friend_id))
        .await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn list_friends(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let friends = state.users.friends_of(UserId::new(id)).await?;
    Ok(Json(ApiResponse::success(friends)))
}

pub async fn mutual_friends(
    State(state): State<Arc<SharedState>>,
    Path((id, other_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let friends = state
        .users
        .mutual_friends(UserId::new(id), UserId::new(other_id))
        .await?;
    Ok(Json(ApiResponse::success(friends)))
}
