use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Store where the sale happened (the operator's display store)
    pub store_id: i32,
    pub customer_name: String,
    /// First mobile supplied at entry; all numbers live in invoice_contacts
    pub customer_mobile: Option<String>,
    pub date: String,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
}

impl Model {
    /// Derived, never stored.
    pub fn balance_due(&self) -> Decimal {
        self.total_amount - self.paid_amount
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id"
    )]
    Store,
    #[sea_orm(has_many = "super::invoice_item::Entity")]
    InvoiceItem,
    #[sea_orm(has_many = "super::invoice_contact::Entity")]
    InvoiceContact,
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl Related<super::invoice_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvoiceItem.def()
    }
}

impl Related<super::invoice_contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvoiceContact.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
