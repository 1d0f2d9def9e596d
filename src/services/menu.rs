use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::MenuItem;
use crate::repositories::MenuRepository;

/// Navigation menus that cache links to collections
///
/// Deleting a collection asks for the affected menus first, then has them
/// regenerated once the collection is gone.
#[async_trait]
pub trait MenuUpdater: Send + Sync {
    /// Ids of menus holding an item that links to the collection
    async fn menus_that_need_update(&self, collection_id: i32) -> AppResult<Vec<i32>>;

    /// Rebuild the cached content of each menu
    async fn update_menus(&self, menu_ids: &[i32]) -> AppResult<()>;
}

/// Menu updater backed by the menus tables
#[derive(Clone)]
pub struct DbMenuUpdater {
    db: DatabaseConnection,
}

impl DbMenuUpdater {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MenuUpdater for DbMenuUpdater {
    async fn menus_that_need_update(&self, collection_id: i32) -> AppResult<Vec<i32>> {
        MenuRepository::menu_ids_for_collection(&self.db, collection_id).await
    }

    async fn update_menus(&self, menu_ids: &[i32]) -> AppResult<()> {
        for &menu_id in menu_ids {
            let items = MenuRepository::items(&self.db, menu_id).await?;

            let collection_ids: Vec<i32> =
                items.iter().filter_map(|item| item.collection_id).collect();
            let slugs = MenuRepository::collection_slugs(&self.db, &collection_ids).await?;

            let content = menu_json(&items, &slugs);
            MenuRepository::set_json_content(&self.db, menu_id, content).await?;

            tracing::info!(menu_id, items = items.len(), "Menu content regenerated");
        }

        Ok(())
    }
}

/// Storefront rendering of menu items: `[{"name", "url"}]` in display order
///
/// Items whose collection no longer exists are dropped.
pub fn menu_json(items: &[MenuItem], collection_slugs: &HashMap<i32, String>) -> Value {
    let entries: Vec<Value> = items
        .iter()
        .filter_map(|item| {
            let url = match item.collection_id {
                Some(id) => {
                    let slug = collection_slugs.get(&id)?;
                    format!("/collections/{}-{}/", slug, id)
                }
                None => item.url.clone().unwrap_or_default(),
            };
            Some(json!({ "name": item.name, "url": url }))
        })
        .collect();

    Value::Array(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i32, name: &str, url: Option<&str>, collection_id: Option<i32>) -> MenuItem {
        MenuItem {
            id,
            menu_id: 1,
            name: name.to_string(),
            url: url.map(str::to_string),
            collection_id,
            sort_order: id,
        }
    }

    #[test]
    fn test_menu_json_links_collections_by_slug() {
        let items = vec![
            item(1, "Home", Some("/"), None),
            item(2, "Summer", None, Some(7)),
        ];
        let slugs = HashMap::from([(7, "summer-sale".to_string())]);

        assert_eq!(
            menu_json(&items, &slugs),
            json!([
                {"name": "Home", "url": "/"},
                {"name": "Summer", "url": "/collections/summer-sale-7/"}
            ])
        );
    }

    #[test]
    fn test_menu_json_drops_missing_collections() {
        let items = vec![item(1, "Gone", None, Some(3))];
        assert_eq!(menu_json(&items, &HashMap::new()), json!([]));
    }
}
