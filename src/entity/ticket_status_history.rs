use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;

use super::tickets::TicketStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket_status_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ticket_id: i64,
    pub old_status: Option<TicketStatus>,
    pub new_status: TicketStatus,
    pub changed_by_user_id: i64,
    pub changed_by_role: String,
    pub change_reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tickets::Entity",
        from = "Column::TicketId",
        to = "super::tickets::Column::Id"
    )]
    Tickets,
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tickets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    pub fn find_by_ticket_newest_first(ticket_id: i64) -> Select<Entity> {
        Self::find()
            .filter(Column::TicketId.eq(ticket_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
    }
}
