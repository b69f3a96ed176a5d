//! `SeaORM` implementation of the catalog store.

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::domain::{GenreId, MpaId};
use crate::entities::{genres, mpa_ratings, prelude::*};
use crate::models::{Genre, MpaRating};
use crate::services::CatalogError;
use crate::storage::CatalogStore;

pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

fn map_genre(model: genres::Model) -> Genre {
    Genre {
        id: GenreId::new(model.id),
        name: model.name,
    }
}

fn map_mpa(model: mpa_ratings::Model) -> MpaRating {
    MpaRating {
        id: MpaId::new(model.id),
        name: model.name,
    }
}

#[async_trait::async_trait]
impl CatalogStore for CatalogRepository {
    async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let rows = Genres::find()
            .order_by_asc(genres::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(map_genre).collect())
    }

    async fn genre(&self, id: GenreId) -> Result<Genre, CatalogError> {
        Genres::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .map(map_genre)
            .ok_or(CatalogError::GenreNotFound(id))
    }

    async fn mpa_ratings(&self) -> Result<Vec<MpaRating>, CatalogError> {
        let rows = MpaRatings::find()
            .order_by_asc(mpa_ratings::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(map_mpa).collect())
    }

    async fn mpa_rating(&self, id: MpaId) -> Result<MpaRating, CatalogError> {
        MpaRatings::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .map(map_mpa)
            .ok_or(CatalogError::MpaNotFound(id))
    }
}
