//! Store-backed implementation of the [`UserService`] trait.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::UserId;
use crate::models::User;
use crate::services::user_service::{UserError, UserPayload, UserService, mutual_friend_ids};
use crate::storage::{FilmStore, UserStore};
use crate::validation::ValidationError;

pub struct StoreUserService {
    users: Arc<dyn UserStore>,
    films: Arc<dyn FilmStore>,
}

impl StoreUserService {
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, films: Arc<dyn FilmStore>) -> Self {
        Self { users, films }
    }

    async fn materialize(&self, ids: Vec<UserId>) -> Result<Vec<User>, UserError> {
        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            users.push(self.users.find_by_id(id).await?);
        }
        Ok(users)
    }
}

fn from_payload(id: UserId, payload: UserPayload) -> User {
    User {
        id,
        email: payload.email,
        login: payload.login,
        name: payload.name,
        birthday: payload.birthday,
        friends: BTreeSet::new(),
    }
}

#[async_trait::async_trait]
impl UserService for StoreUserService {
    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.users.get_all().await
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.users.find_by_id(id).await
    }

    async fn create_user(&self, user: UserPayload) -> Result<User, UserError> {
        self.users.add(from_payload(UserId::default(), user)).await
    }

    async fn update_user(&self, id: UserId, user: UserPayload) -> Result<User, UserError> {
        self.users.update(from_payload(id, user)).await
    }

    async fn remove_user(&self, id: UserId) -> Result<(), UserError> {
        // Dissolve relations first so no friend set or like set keeps a
        // dangling reference to the removed user.
        for friend in self.users.friend_ids(id).await? {
            self.users.remove_friendship(id, friend).await?;
        }
        self.films
            .remove_likes_by_user(id)
            .await
            .map_err(|e| UserError::Storage(e.to_string()))?;
        self.users.remove(id).await
    }

    async fn add_friend(&self, user: UserId, friend: UserId) -> Result<User, UserError> {
        if user == friend {
            return Err(ValidationError(format!(
                "User {user} cannot befriend themselves"
            ))
            .into());
        }
        self.users.add_friendship(user, friend).await?;
        self.users.find_by_id(user).await
    }

    async fn remove_friend(&self, user: UserId, friend: UserId) -> Result<User, UserError> {
        self.users.remove_friendship(user, friend).await?;
        self.users.find_by_id(user).await
    }

    async fn friends_of(&self, user: UserId) -> Result<Vec<User>, UserError> {
        let ids = self.users.friend_ids(user).await?;
        self.materialize(ids.into_iter().collect()).await
    }

    async fn mutual_friends(&self, user: UserId, other: UserId) -> Result<Vec<User>, UserError> {
        let mine = self.users.friend_ids(user).await?;
        let theirs = self.users.friend_ids(other).await?;
        self.materialize(mutual_friend_ids(&mine, &theirs)).await
    }
}
