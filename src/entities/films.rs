use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "films")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(unique)]
    pub name: String,

    pub description: String,

    pub release_date: Date,

    /// Running time in minutes.
    pub duration: i32,

    pub mpa_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mpa_ratings::Entity",
        from = "Column::MpaId",
        to = "super::mpa_ratings::Column::Id"
    )]
    MpaRating,
}

impl Related<super::mpa_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MpaRating.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
