use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A physical sub-location (shelf/rack) used to find items, orthogonal to
/// which store holds the stock.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_location::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_location::Relation::Location.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
