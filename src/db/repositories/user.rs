//! `SeaORM` implementation of the user store.
//!
//! Friendships are symmetric, so each confirmed pair is stored as two
//! directed rows. Both rows are written and removed inside a transaction
//! to keep the relation consistent under concurrent requests.

use std::collections::BTreeSet;

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::UserId;
use crate::entities::{friendships, prelude::*, users};
use crate::models::User;
use crate::services::UserError;
use crate::storage::UserStore;
use crate::validation;

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn friends_of(&self, id: UserId) -> Result<BTreeSet<UserId>, UserError> {
        let rows = Friendships::find()
            .filter(friendships::Column::UserId.eq(id.value()))
            .all(&self.conn)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| UserId::new(row.friend_id))
            .collect())
    }

    async fn materialize(&self, model: users::Model) -> Result<User, UserError> {
        let friends = self.friends_of(UserId::new(model.id)).await?;
        Ok(User {
            id: UserId::new(model.id),
            email: model.email,
            login: model.login,
            name: model.name,
            birthday: model.birthday,
            friends,
        })
    }

    async fn ensure_exists(&self, id: UserId) -> Result<(), UserError> {
        if Users::find_by_id(id.value()).one(&self.conn).await?.is_none() {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserStore for UserRepository {
    async fn add(&self, mut user: User) -> Result<User, UserError> {
        validation::validate_user(&user)?;
        validation::fill_default_display_name(&mut user);

        if Users::find()
            .filter(users::Column::Login.eq(user.login.clone()))
            .one(&self.conn)
            .await?
            .is_some()
        {
            return Err(UserError::Duplicate(user.login));
        }

        let id = Users::insert(users::ActiveModel {
            id: NotSet,
            email: Set(user.email.clone()),
            login: Set(user.login.clone()),
            name: Set(user.name.clone()),
            birthday: Set(user.birthday),
        })
        .exec(&self.conn)
        .await?
        .last_insert_id;

        user.id = UserId::new(id);
        user.friends = BTreeSet::new();
        tracing::info!("Created user {} '{}'", user.id, user.login);
        Ok(user)
    }

    async fn update(&self, mut user: User) -> Result<User, UserError> {
        validation::validate_user(&user)?;
        validation::fill_default_display_name(&mut user);

        if Users::find()
            .filter(users::Column::Login.eq(user.login.clone()))
            .filter(users::Column::Id.ne(user.id.value()))
            .one(&self.conn)
            .await?
            .is_some()
        {
            return Err(UserError::Duplicate(user.login));
        }

        let existing = Users::find_by_id(user.id.value())
            .one(&self.conn)
            .await?
            .ok_or(UserError::NotFound(user.id))?;

        let mut active: users::ActiveModel = existing.into();
        active.email = Set(user.email.clone());
        active.login = Set(user.login.clone());
        active.name = Set(user.name.clone());
        active.birthday = Set(user.birthday);
        active.update(&self.conn).await?;

        user.friends = self.friends_of(user.id).await?;
        tracing::info!("Updated user {}", user.id);
        Ok(user)
    }

    async fn remove(&self, id: UserId) -> Result<(), UserError> {
        let txn = self.conn.begin().await?;
        let deleted = Users::delete_by_id(id.value()).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            return Err(UserError::NotFound(id));
        }
        Friendships::delete_many()
            .filter(
                friendships::Column::UserId
                    .eq(id.value())
                    .or(friendships::Column::FriendId.eq(id.value())),
            )
            .exec(&txn)
            .await?;
        txn.commit().await?;
        tracing::info!("Removed user {}", id);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<User>, UserError> {
        let rows = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for model in rows {
            out.push(self.materialize(model).await?);
        }
        Ok(out)
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserError> {
        let model = Users::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .ok_or(UserError::NotFound(id))?;
        self.materialize(model).await
    }

    async fn add_friendship(&self, user: UserId, friend: UserId) -> Result<(), UserError> {
        self.ensure_exists(user).await?;
        self.ensure_exists(friend).await?;

        if Friendships::find_by_id((user.value(), friend.value()))
            .one(&self.conn)
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateFriendship { user, friend });
        }

        let txn = self.conn.begin().await?;
        Friendships::insert(friendships::ActiveModel {
            user_id: Set(user.value()),
            friend_id: Set(friend.value()),
        })
        .exec(&txn)
        .await?;
        Friendships::insert(friendships::ActiveModel {
            user_id: Set(friend.value()),
            friend_id: Set(user.value()),
        })
        .exec(&txn)
        .await?;
        txn.commit().await?;
        tracing::info!("Users {} and {} are now friends", user, friend);
        Ok(())
    }

    async fn remove_friendship(&self, user: UserId, friend: UserId) -> Result<(), UserError> {
        self.ensure_exists(user).await?;
        self.ensure_exists(friend).await?;

        let txn = self.conn.begin().await?;
        let deleted = Friendships::delete_by_id((user.value(), friend.value()))
            .exec(&txn)
            .await?;
        if deleted.rows_affected == 0 {
            return Err(UserError::FriendshipNotFound { user, friend });
        }
        Friendships::delete_by_id((friend.value(), user.value()))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        tracing::info!("Users {} and {} are no longer friends", user, friend);
        Ok(())
    }

    async fn friend_ids(&self, id: UserId) -> Result<BTreeSet<UserId>, UserError> {
        self.ensure_exists(id).await?;
        self.friends_of(id).await
    }
}
