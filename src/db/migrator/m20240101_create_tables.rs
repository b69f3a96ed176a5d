use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

use crate::services::catalog_service::{default_genres, default_mpa_ratings};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(MpaRatings)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                schema
                    .create_table_from_entity(Genres)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                schema
                    .create_table_from_entity(Films)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmGenres)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmLikes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                schema
                    .create_table_from_entity(Friendships)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Seed the read-only reference catalogs.
        for genre in default_genres() {
            let insert = Query::insert()
                .into_table(Genres)
                .columns([
                    crate::entities::genres::Column::Id,
                    crate::entities::genres::Column::Name,
                ])
                .values_panic([genre.id.value().into(), genre.name.into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        for rating in default_mpa_ratings() {
            let insert = Query::insert()
                .into_table(MpaRatings)
                .columns([
                    crate::entities::mpa_ratings::Column::Id,
                    crate::entities::mpa_ratings::Column::Name,
                ])
                .values_panic([rating.id.value().into(), rating.name.into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Friendships).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmLikes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmGenres).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Films).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MpaRatings).to_owned())
            .await?;

        Ok(())
    }
}
