//! `SeaORM` Entity for the bill_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bill_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub bill_id: Uuid,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((15, 4)))")]
    pub quantity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 4)))")]
    pub unit_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 4)))")]
    pub amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendor_bills::Entity",
        from = "Column::BillId",
        to = "super::vendor_bills::Column::Id"
    )]
    VendorBills,
}

impl Related<super::vendor_bills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VendorBills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
