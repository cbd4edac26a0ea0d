use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The single central warehouse. Only GODOWN-typed stores hold stock rows.
pub const STORE_TYPE_GODOWN: &str = "GODOWN";
/// A customer-facing shop that sells from godown stock.
pub const STORE_TYPE_DISPLAY: &str = "DISPLAY";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub store_type: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock::Entity")]
    Stock,
    #[sea_orm(has_many = "super::invoice::Entity")]
    Invoice,
}

impl Related<super::stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stock.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
