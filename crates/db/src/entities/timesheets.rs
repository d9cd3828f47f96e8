//! `SeaORM` Entity for the timesheets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TimesheetStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "timesheets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub task_id: Option<Uuid>,
    pub work_date: Date,
    #[sea_orm(column_type = "Decimal(Some((15, 4)))")]
    pub duration_hours: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 4)))")]
    pub hourly_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 4)))")]
    pub amount: Decimal,
    pub status: TimesheetStatus,
    pub invoiced: bool,
    pub invoice_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Projects,
    #[sea_orm(
        belongs_to = "super::tasks::Entity",
        from = "Column::TaskId",
        to = "super::tasks::Column::Id"
    )]
    Tasks,
    #[sea_orm(
        belongs_to = "super::customer_invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::customer_invoices::Column::Id"
    )]
    CustomerInvoices,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Related<super::customer_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerInvoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
