//! `SeaORM` Entity for the vendor_bills table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::VendorBillStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor_bills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub number: String,
    pub project_id: Option<Uuid>,
    pub source_po_id: Option<Uuid>,
    pub vendor_id: Option<Uuid>,
    pub vendor_name: Option<String>,
    pub status: VendorBillStatus,
    #[sea_orm(column_type = "Decimal(Some((15, 4)))")]
    pub total_amount: Decimal,
    pub currency: String,
    pub due_date: Option<Date>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
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
        belongs_to = "super::purchase_orders::Entity",
        from = "Column::SourcePoId",
        to = "super::purchase_orders::Column::Id"
    )]
    PurchaseOrders,
    #[sea_orm(has_many = "super::bill_lines::Entity")]
    BillLines,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::purchase_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrders.def()
    }
}

impl Related<super::bill_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
