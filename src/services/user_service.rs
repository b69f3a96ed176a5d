//! Domain service for user operations: CRUD and friendships.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::domain::UserId;
use crate::models::User;
use crate::validation::ValidationError;

/// Domain errors for user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User {0} not found")]
    NotFound(UserId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Login '{0}' is already registered")]
    Duplicate(String),

    #[error("Users {user} and {friend} are already friends")]
    DuplicateFriendship { user: UserId, friend: UserId },

    #[error("Users {user} and {friend} are not friends")]
    FriendshipNotFound { user: UserId, friend: UserId },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Mutable user fields as submitted by a caller.
#[derive(Debug, Clone)]
pub struct UserPayload {
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
}

/// User operations exposed to the HTTP layer.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Lists every user, in ascending id order.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    async fn get_user(&self, id: UserId) -> Result<User, UserError>;

    /// Validates the payload, fills a blank display name from the login,
    /// assigns a fresh id and stores the user. Duplicate logins are rejected.
    async fn create_user(&self, user: UserPayload) -> Result<User, UserError>;

    /// Replaces the mutable fields of an existing user wholesale. The friend
    /// set is owned by the friendship operations and survives the update.
    async fn update_user(&self, id: UserId, user: UserPayload) -> Result<User, UserError>;

    /// Removes a user together with their friendships and likes.
    async fn remove_user(&self, id: UserId) -> Result<(), UserError>;

    /// Makes two users friends. The relation is symmetric and written as one
    /// logical operation; befriending an existing friend is an error.
    async fn add_friend(&self, user: UserId, friend: UserId) -> Result<User, UserError>;

    /// Dissolves a friendship on both sides. Removing a friendship that does
    /// not exist is an error.
    async fn remove_friend(&self, user: UserId, friend: UserId) -> Result<User, UserError>;

    /// Returns the materialized friend list of a user, id-ascending.
    async fn friends_of(&self, user: UserId) -> Result<Vec<User>, UserError>;

    /// Returns the friends two users have in common, id-ascending. An empty
    /// intersection is an empty list, never an error.
    async fn mutual_friends(&self, user: UserId, other: UserId) -> Result<Vec<User>, UserError>;
}

/// Intersects two friend-id sets, returning the common ids in ascending
/// order. Symmetric in its arguments.
#[must_use]
pub fn mutual_friend_ids(a: &BTreeSet<UserId>, b: &BTreeSet<UserId>) -> Vec<UserId> {
    a.intersection(b).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i64]) -> BTreeSet<UserId> {
        values.iter().copied().map(UserId::new).collect()
    }

    #[test]
    fn intersection_is_sorted_and_symmetric() {
        let a = ids(&[3, 1, 7, 5]);
        let b = ids(&[5, 2, 3]);
        let forward = mutual_friend_ids(&a, &b);
        let backward = mutual_friend_ids(&b, &a);
        assert_eq!(forward, vec![UserId::new(3), UserId::new(5)]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn empty_intersection_is_empty() {
        assert!(mutual_friend_ids(&ids(&[1, 2]), &ids(&[3, 4])).is_empty());
        assert!(mutual_friend_ids(&ids(&[]), &ids(&[1])).is_empty());
    }

    #[test]
    fn user_error_display() {
        let err = UserError::FriendshipNotFound {
            user: UserId::new(1),
            friend: UserId::new(2),
        };
        assert_eq!(err.to_string(), "Users 1 and 2 are not friends");
    }
}
