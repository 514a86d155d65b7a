use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "routes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub start_point: String,
    pub end_point: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub intermediate_stops: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub distance: f64,
    pub estimated_travel_time: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    pub fn find_ordered() -> Select<Entity> {
        Self::find().order_by_asc(Column::Id)
    }
}
