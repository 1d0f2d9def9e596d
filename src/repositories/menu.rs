use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entity::collection::{Column as CollectionColumn, Entity as CollectionEntity};
use crate::entity::menu::{self, ActiveModel, Entity as MenuEntity};
use crate::entity::menu_item::{self, Column as MenuItemColumn, Entity as MenuItemEntity};
use crate::error::{AppError, AppResult};
use crate::models::{Menu, MenuItem};

/// Menu repository; the dashboard only reads items and refreshes cached content
pub struct MenuRepository;

impl MenuRepository {
    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Menu> {
        let model = MenuEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu".to_string()))?;

        Ok(model.into())
    }

    /// Create an empty menu
    pub async fn create(db: &DatabaseConnection, name: &str) -> AppResult<Menu> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            json_content: Set(serde_json::json!([])),
            ..Default::default()
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Append an item to a menu, linking either a url or a collection
    pub async fn add_item(
        db: &DatabaseConnection,
        menu_id: i32,
        name: &str,
        url: Option<&str>,
        collection_id: Option<i32>,
        sort_order: i32,
    ) -> AppResult<MenuItem> {
        let model = menu_item::ActiveModel {
            menu_id: Set(menu_id),
            name: Set(name.to_string()),
            url: Set(url.map(str::to_string)),
            collection_id: Set(collection_id),
            sort_order: Set(sort_order),
            ..Default::default()
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Distinct ids of menus with at least one item pointing at the collection
    pub async fn menu_ids_for_collection(
        db: &DatabaseConnection,
        collection_id: i32,
    ) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = MenuItemEntity::find()
            .select_only()
            .column(MenuItemColumn::MenuId)
            .filter(MenuItemColumn::CollectionId.eq(collection_id))
            .distinct()
            .order_by_asc(MenuItemColumn::MenuId)
            .into_tuple()
            .all(db)
            .await?;

        Ok(ids)
    }

    /// Items of a menu in display order
    pub async fn items(db: &DatabaseConnection, menu_id: i32) -> AppResult<Vec<MenuItem>> {
        let models = MenuItemEntity::find()
            .filter(MenuItemColumn::MenuId.eq(menu_id))
            .order_by_asc(MenuItemColumn::SortOrder)
            .order_by_asc(MenuItemColumn::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Slugs of the given collections, keyed by id
    pub async fn collection_slugs(
        db: &DatabaseConnection,
        collection_ids: &[i32],
    ) -> AppResult<HashMap<i32, String>> {
        if collection_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, String)> = CollectionEntity::find()
            .select_only()
            .column(CollectionColumn::Id)
            .column(CollectionColumn::Slug)
            .filter(CollectionColumn::Id.is_in(collection_ids.iter().copied()))
            .into_tuple()
            .all(db)
            .await?;

        Ok(rows.into_iter().collect())
    }

    pub async fn set_json_content(
        db: &DatabaseConnection,
        id: i32,
        content: serde_json::Value,
    ) -> AppResult<()> {
        let model = MenuEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu".to_string()))?;

        let mut active: ActiveModel = model.into();
        active.json_content = Set(content);
        active.update(db).await?;

        Ok(())
    }
}

impl From<menu::Model> for Menu {
    fn from(m: menu::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            json_content: m.json_content,
        }
    }
}

impl From<menu_item::Model> for MenuItem {
    fn from(m: menu_item::Model) -> Self {
        Self {
            id: m.id,
            menu_id: m.menu_id,
            name: m.name,
            url: m.url,
            collection_id: m.collection_id,
            sort_order: m.sort_order,
        }
    }
}
