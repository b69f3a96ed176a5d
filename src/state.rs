use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::db::Store;
use crate::services::{
    CatalogService, FilmService, StoreCatalogService, StoreFilmService, StoreUserService,
    UserService,
};
use crate::storage::{
    CatalogStore, FilmStore, MemoryCatalogStore, MemoryFilmStore, MemoryUserStore, UserStore,
};

/// Everything the request handlers need, wired once at startup.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub films: Arc<dyn FilmService>,

    pub users: Arc<dyn UserService>,

    pub catalogs: Arc<dyn CatalogService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let (film_store, user_store, catalog_store) = match config.storage.backend {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory storage backend");
                (
                    Arc::new(MemoryFilmStore::new()) as Arc<dyn FilmStore>,
                    Arc::new(MemoryUserStore::new()) as Arc<dyn UserStore>,
                    Arc::new(MemoryCatalogStore::new()) as Arc<dyn CatalogStore>,
                )
            }
            StorageBackend::Database => {
                let store = Store::with_pool_options(
                    &config.storage.database_path,
                    config.storage.max_db_connections,
                    config.storage.min_db_connections,
                )
                .await?;
                (
                    Arc::new(store.film_repo()) as Arc<dyn FilmStore>,
                    Arc::new(store.user_repo()) as Arc<dyn UserStore>,
                    Arc::new(store.catalog_repo()) as Arc<dyn CatalogStore>,
                )
            }
        };

        Ok(Self::from_stores(config, film_store, user_store, catalog_store))
    }

    /// Wires the services over already-built stores. Used by tests to run
    /// the full stack against a fresh backend.
    #[must_use]
    pub fn from_stores(
        config: Config,
        film_store: Arc<dyn FilmStore>,
        user_store: Arc<dyn UserStore>,
        catalog_store: Arc<dyn CatalogStore>,
    ) -> Self {
        let films = Arc::new(StoreFilmService::new(
            film_store.clone(),
            user_store.clone(),
            catalog_store.clone(),
        )) as Arc<dyn FilmService>;

        let users = Arc::new(StoreUserService::new(user_store, film_store))
            as Arc<dyn UserService>;

        let catalogs = Arc::new(StoreCatalogService::new(catalog_store)) as Arc<dyn CatalogService>;

        Self {
            config: Arc::new(config),
            films,
            users,
            catalogs,
        }
    }
}
