use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// 'TILES', 'MARBLE', 'GRANITE', 'SANITARY' or 'OTHER'
    pub category: String,
    /// Descriptive only, e.g. "2x2", "7x4"
    pub size: String,
    pub unit: String,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock::Entity")]
    Stock,
}

impl Related<super::stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stock.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_location::Relation::Location.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_location::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
