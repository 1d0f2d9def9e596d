use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};

use crate::entity::collection::{self, ActiveModel, Column, Entity as CollectionEntity};
use crate::entity::collection_product::{
    self, Column as CollectionProductColumn, Entity as CollectionProductEntity,
};
use crate::entity::product::Entity as ProductEntity;
use crate::error::{AppError, AppResult};
use crate::models::{Collection, CollectionInput, Product};
use crate::repositories::Repository;

/// Collection repository for database operations
pub struct CollectionRepository;

#[async_trait]
impl Repository<Collection> for CollectionRepository {
    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Collection> {
        let model = find_model(db, id).await?;
        Ok(model.into())
    }

    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let result = CollectionEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Collection".to_string()));
        }

        Ok(())
    }

    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<Collection>> {
        let models = CollectionEntity::find()
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = CollectionEntity::find().count(db).await?;
        Ok(count)
    }
}

impl CollectionRepository {
    /// All collections in creation order
    pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<Collection>> {
        let models = CollectionEntity::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Insert a collection and its product set
    pub async fn create<C>(conn: &C, input: &CollectionInput) -> AppResult<Collection>
    where
        C: ConnectionTrait,
    {
        let now = time::OffsetDateTime::now_utc();
        let model = ActiveModel {
            name: Set(input.name.clone()),
            slug: Set(input.slug.clone()),
            is_published: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(conn).await.map_err(slug_conflict)?;
        Self::set_products(conn, result.id, &input.product_ids).await?;

        Ok(result.into())
    }

    /// Overwrite name, slug and product set of an existing collection
    pub async fn update<C>(conn: &C, id: i32, input: &CollectionInput) -> AppResult<Collection>
    where
        C: ConnectionTrait,
    {
        let model = find_model(conn, id).await?;

        let mut active: ActiveModel = model.into();
        active.name = Set(input.name.clone());
        active.slug = Set(input.slug.clone());
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(conn).await.map_err(slug_conflict)?;
        Self::set_products(conn, id, &input.product_ids).await?;

        Ok(result.into())
    }

    /// Replace the product association with exactly `product_ids`
    pub async fn set_products<C>(conn: &C, id: i32, product_ids: &[i32]) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        CollectionProductEntity::delete_many()
            .filter(CollectionProductColumn::CollectionId.eq(id))
            .exec(conn)
            .await?;

        let mut unique = product_ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        if unique.is_empty() {
            return Ok(());
        }

        let rows = unique
            .into_iter()
            .map(|product_id| collection_product::ActiveModel {
                collection_id: Set(id),
                product_id: Set(product_id),
            });

        CollectionProductEntity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;

        Ok(())
    }

    /// Product ids associated with a collection, ascending
    pub async fn product_ids<C>(conn: &C, id: i32) -> AppResult<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        let ids: Vec<i32> = CollectionProductEntity::find()
            .select_only()
            .column(CollectionProductColumn::ProductId)
            .filter(CollectionProductColumn::CollectionId.eq(id))
            .order_by_asc(CollectionProductColumn::ProductId)
            .into_tuple()
            .all(conn)
            .await?;

        Ok(ids)
    }

    /// Products associated with a collection
    pub async fn products(db: &DatabaseConnection, id: i32) -> AppResult<Vec<Product>> {
        let model = find_model(db, id).await?;
        let products = model
            .find_related(ProductEntity)
            .order_by_asc(crate::entity::product::Column::Id)
            .all(db)
            .await?;

        Ok(products.into_iter().map(|p| p.into()).collect())
    }

    /// Whether a collection other than `exclude` already uses `slug`
    pub async fn slug_taken<C>(conn: &C, slug: &str, exclude: Option<i32>) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let mut query = CollectionEntity::find().filter(Column::Slug.eq(slug));
        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }

        Ok(query.count(conn).await? > 0)
    }

    /// Flip `is_published` and return the stored collection
    pub async fn toggle_published(db: &DatabaseConnection, id: i32) -> AppResult<Collection> {
        let model = find_model(db, id).await?;
        let published = model.is_published;

        let mut active: ActiveModel = model.into();
        active.is_published = Set(!published);
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }
}

/// Unique slug index hit by a concurrent write
fn slug_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict("Collection".to_string()),
        _ => err.into(),
    }
}

async fn find_model<C>(conn: &C, id: i32) -> AppResult<collection::Model>
where
    C: ConnectionTrait,
{
    CollectionEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Collection".to_string()))
}

// Conversion from SeaORM model to our domain model
impl From<collection::Model> for Collection {
    fn from(m: collection::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            is_published: m.is_published,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
