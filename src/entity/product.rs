use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog product; only its identity is used by the dashboard
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::collection_product::Entity")]
    CollectionProducts,
}

impl Related<super::collection_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CollectionProducts.def()
    }
}

impl Related<super::collection::Entity> for Entity {
    fn to() -> RelationDef {
        super::collection_product::Relation::Collection.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::collection_product::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
