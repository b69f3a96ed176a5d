//! `SeaORM` implementation of the film store.
//!
//! Films span three tables: the `films` row itself, `film_genres` links and
//! `film_likes` rows. Multi-table writes run inside a transaction so a
//! failed call leaves no partial film behind.

use std::collections::{BTreeSet, HashMap};

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::{FilmId, GenreId, MpaId, UserId};
use crate::entities::{film_genres, film_likes, films, prelude::*};
use crate::models::{Film, Genre, MpaRating};
use crate::services::FilmError;
use crate::storage::FilmStore;
use crate::validation;

pub struct FilmRepository {
    conn: DatabaseConnection,
}

impl FilmRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn assemble(
        model: films::Model,
        mpa: Option<MpaRating>,
        genres: Vec<Genre>,
        likes: BTreeSet<UserId>,
    ) -> Film {
        Film {
            id: FilmId::new(model.id),
            name: model.name,
            description: model.description,
            release_date: model.release_date,
            duration: model.duration,
            mpa,
            genres,
            likes,
        }
    }

    async fn genres_for(&self, id: FilmId) -> Result<Vec<Genre>, FilmError> {
        let links = FilmGenres::find()
            .filter(film_genres::Column::FilmId.eq(id.value()))
            .all(&self.conn)
            .await?;
        let ids: Vec<i32> = links.into_iter().map(|l| l.genre_id).collect();
        let rows = Genres::find()
            .filter(crate::entities::genres::Column::Id.is_in(ids))
            .order_by_asc(crate::entities::genres::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows
            .into_iter()
            .map(|g| Genre {
                id: GenreId::new(g.id),
                name: g.name,
            })
            .collect())
    }

    async fn likes_for(&self, id: FilmId) -> Result<BTreeSet<UserId>, FilmError> {
        let rows = FilmLikes::find()
            .filter(film_likes::Column::FilmId.eq(id.value()))
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(|l| UserId::new(l.user_id)).collect())
    }

    async fn insert_genre_links(
        txn: &DatabaseTransaction,
        id: i64,
        genres: &[Genre],
    ) -> Result<(), FilmError> {
        for genre in genres {
            FilmGenres::insert(film_genres::ActiveModel {
                film_id: Set(id),
                genre_id: Set(genre.id.value()),
            })
            .exec(txn)
            .await?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl FilmStore for FilmRepository {
    async fn add(&self, mut film: Film) -> Result<Film, FilmError> {
        validation::validate_film(&film)?;
        film.normalize_genres();

        if Films::find()
            .filter(films::Column::Name.eq(film.name.clone()))
            .one(&self.conn)
            .await?
            .is_some()
        {
            return Err(FilmError::Duplicate(film.name));
        }

        let txn = self.conn.begin().await?;
        let id = Films::insert(films::ActiveModel {
            id: NotSet,
            name: Set(film.name.clone()),
            description: Set(film.description.clone()),
            release_date: Set(film.release_date),
            duration: Set(film.duration),
            mpa_id: Set(film.mpa.as_ref().map(|m| m.id.value())),
        })
        .exec(&txn)
        .await?
        .last_insert_id;
        Self::insert_genre_links(&txn, id, &film.genres).await?;
        txn.commit().await?;

        film.id = FilmId::new(id);
        film.likes = BTreeSet::new();
        tracing::info!("Added film {} '{}'", film.id, film.name);
        Ok(film)
    }

    async fn update(&self, mut film: Film) -> Result<Film, FilmError> {
        validation::validate_film(&film)?;
        film.normalize_genres();

        if Films::find()
            .filter(films::Column::Name.eq(film.name.clone()))
            .filter(films::Column::Id.ne(film.id.value()))
            .one(&self.conn)
            .await?
            .is_some()
        {
            return Err(FilmError::Duplicate(film.name));
        }

        let txn = self.conn.begin().await?;
        let existing = Films::find_by_id(film.id.value())
            .one(&txn)
            .await?
            .ok_or(FilmError::NotFound(film.id))?;

        let mut active: films::ActiveModel = existing.into();
        active.name = Set(film.name.clone());
        active.description = Set(film.description.clone());
        active.release_date = Set(film.release_date);
        active.duration = Set(film.duration);
        active.mpa_id = Set(film.mpa.as_ref().map(|m| m.id.value()));
        active.update(&txn).await?;

        FilmGenres::delete_many()
            .filter(film_genres::Column::FilmId.eq(film.id.value()))
            .exec(&txn)
            .await?;
        Self::insert_genre_links(&txn, film.id.value(), &film.genres).await?;
        txn.commit().await?;

        film.likes = self.likes_for(film.id).await?;
        tracing::info!("Updated film {}", film.id);
        Ok(film)
    }

    async fn remove(&self, id: FilmId) -> Result<(), FilmError> {
        let txn = self.conn.begin().await?;
        let deleted = Films::delete_by_id(id.value()).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            return Err(FilmError::NotFound(id));
        }
        FilmGenres::delete_many()
            .filter(film_genres::Column::FilmId.eq(id.value()))
            .exec(&txn)
            .await?;
        FilmLikes::delete_many()
            .filter(film_likes::Column::FilmId.eq(id.value()))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        tracing::info!("Removed film {}", id);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Film>, FilmError> {
        let rows = Films::find()
            .order_by_asc(films::Column::Id)
            .find_also_related(MpaRatings)
            .all(&self.conn)
            .await?;

        // Batch the auxiliary tables instead of querying per film.
        let genre_rows = Genres::find().all(&self.conn).await?;
        let genre_names: HashMap<i32, String> =
            genre_rows.into_iter().map(|g| (g.id, g.name)).collect();

        let mut genres_by_film: HashMap<i64, Vec<Genre>> = HashMap::new();
        for link in FilmGenres::find().all(&self.conn).await? {
            if let Some(name) = genre_names.get(&link.genre_id) {
                genres_by_film.entry(link.film_id).or_default().push(Genre {
                    id: GenreId::new(link.genre_id),
                    name: name.clone(),
                });
            }
        }

        let mut likes_by_film: HashMap<i64, BTreeSet<UserId>> = HashMap::new();
        for like in FilmLikes::find().all(&self.conn).await? {
            likes_by_film
                .entry(like.film_id)
                .or_default()
                .insert(UserId::new(like.user_id));
        }

        Ok(rows
            .into_iter()
            .map(|(model, mpa)| {
                let mut genres = genres_by_film.remove(&model.id).unwrap_or_default();
                genres.sort();
                let likes = likes_by_film.remove(&model.id).unwrap_or_default();
                let mpa = mpa.map(|m| MpaRating {
                    id: MpaId::new(m.id),
                    name: m.name,
                });
                Self::assemble(model, mpa, genres, likes)
            })
            .collect())
    }

    async fn find_by_id(&self, id: FilmId) -> Result<Film, FilmError> {
        let (model, mpa) = Films::find_by_id(id.value())
            .find_also_related(MpaRatings)
            .one(&self.conn)
            .await?
            .ok_or(FilmError::NotFound(id))?;

        let genres = self.genres_for(id).await?;
        let likes = self.likes_for(id).await?;
        let mpa = mpa.map(|m| MpaRating {
            id: MpaId::new(m.id),
            name: m.name,
        });
        Ok(Self::assemble(model, mpa, genres, likes))
    }

    async fn add_like(&self, id: FilmId, user: UserId) -> Result<(), FilmError> {
        if Films::find_by_id(id.value()).one(&self.conn).await?.is_none() {
            return Err(FilmError::NotFound(id));
        }
        if FilmLikes::find_by_id((id.value(), user.value()))
            .one(&self.conn)
            .await?
            .is_some()
        {
            return Err(FilmError::DuplicateLike { film: id, user });
        }
        FilmLikes::insert(film_likes::ActiveModel {
            film_id: Set(id.value()),
            user_id: Set(user.value()),
        })
        .exec(&self.conn)
        .await?;
        tracing::info!("User {} liked film {}", user, id);
        Ok(())
    }

    async fn remove_like(&self, id: FilmId, user: UserId) -> Result<(), FilmError> {
        if Films::find_by_id(id.value()).one(&self.conn).await?.is_none() {
            return Err(FilmError::NotFound(id));
        }
        let deleted = FilmLikes::delete_by_id((id.value(), user.value()))
            .exec(&self.conn)
            .await?;
        if deleted.rows_affected == 0 {
            return Err(FilmError::LikeNotFound { film: id, user });
        }
        tracing::info!("User {} unliked film {}", user, id);
        Ok(())
    }

    async fn remove_likes_by_user(&self, user: UserId) -> Result<(), FilmError> {
        FilmLikes::delete_many()
            .filter(film_likes::Column::UserId.eq(user.value()))
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}
