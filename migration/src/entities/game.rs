use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub company: Option<String>,
    pub genre: String,
    pub release_date: Option<Date>,
    pub min_players: i32,
    pub max_players: i32,
    /// Playtime in minutes
    pub duration: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub image: Option<String>,
    /// Mean review rating rounded to one decimal; NULL while unreviewed
    #[sea_orm(column_type = "Double", nullable)]
    pub avg_rating: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
