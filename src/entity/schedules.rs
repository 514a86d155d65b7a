use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub route_id: Option<i64>,
    pub route_name: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub frequency: String,
    pub available_seats: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    pub fn find_ordered() -> Select<Entity> {
        Self::find().order_by_asc(Column::Id)
    }

    pub fn find_by_route_id(route_id: i64) -> Select<Entity> {
        Self::find()
            .filter(Column::RouteId.eq(route_id))
            .order_by_asc(Column::DepartureTime)
            .order_by_asc(Column::Id)
    }
}
