//! Store-backed implementation of the [`CatalogService`] trait.

use std::sync::Arc;

use crate::domain::{GenreId, MpaId};
use crate::models::{Genre, MpaRating};
use crate::services::catalog_service::{CatalogError, CatalogService};
use crate::storage::CatalogStore;

pub struct StoreCatalogService {
    catalogs: Arc<dyn CatalogStore>,
}

impl StoreCatalogService {
    #[must_use]
    pub fn new(catalogs: Arc<dyn CatalogStore>) -> Self {
        Self { catalogs }
    }
}

#[async_trait::async_trait]
impl CatalogService for StoreCatalogService {
    async fn list_genres(&self) -> Result<Vec<Genre>, CatalogError> {
        self.catalogs.genres().await
    }

    async fn get_genre(&self, id: GenreId) -> Result<Genre, CatalogError> {
        self.catalogs.genre(id).await
    }

    async fn list_mpa_ratings(&self) -> Result<Vec<MpaRating>, CatalogError> {
        self.catalogs.mpa_ratings().await
    }

    async fn get_mpa_rating(&self, id: MpaId) -> Result<MpaRating, CatalogError> {
        self.catalogs.mpa_rating(id).await
    }
}
