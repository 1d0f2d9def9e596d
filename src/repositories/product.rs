use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect, Set,
};

use crate::entity::product::{self, ActiveModel, Column, Entity as ProductEntity};
use crate::error::AppResult;
use crate::models::Product;

/// Read access to catalog products, plus fixture-style creation
pub struct ProductRepository;

impl ProductRepository {
    /// Create a product (the catalog owns products; used for seeding)
    pub async fn create(db: &DatabaseConnection, name: &str) -> AppResult<Product> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Return the subset of `ids` that exist in the catalog
    pub async fn existing_ids<C>(conn: &C, ids: &[i32]) -> AppResult<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: Vec<i32> = ProductEntity::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(conn)
            .await?;

        Ok(found)
    }
}

impl From<product::Model> for Product {
    fn from(m: product::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
