use std::sync::Mutex;

use async_trait::async_trait;
use storefront_dashboard::error::{AppError, AppResult};
use storefront_dashboard::services::MenuUpdater;

/// Menu collaborator double: answers lookups with a fixed set and records calls
pub struct RecordingMenuUpdater {
    menu_ids: Vec<i32>,
    lookups: Mutex<Vec<i32>>,
    updates: Mutex<Vec<Vec<i32>>>,
    fail_updates: bool,
}

impl RecordingMenuUpdater {
    pub fn new(menu_ids: Vec<i32>) -> Self {
        Self {
            menu_ids,
            lookups: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
            fail_updates: false,
        }
    }

    /// Like `new`, but every `update_menus` call is recorded and then fails
    pub fn failing(menu_ids: Vec<i32>) -> Self {
        Self {
            fail_updates: true,
            ..Self::new(menu_ids)
        }
    }

    /// Collection ids passed to `menus_that_need_update`
    pub fn lookups(&self) -> Vec<i32> {
        self.lookups.lock().unwrap().clone()
    }

    /// Menu id sets passed to `update_menus`, one entry per call
    pub fn updates(&self) -> Vec<Vec<i32>> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl MenuUpdater for RecordingMenuUpdater {
    async fn menus_that_need_update(&self, collection_id: i32) -> AppResult<Vec<i32>> {
        self.lookups.lock().unwrap().push(collection_id);
        Ok(self.menu_ids.clone())
    }

    async fn update_menus(&self, menu_ids: &[i32]) -> AppResult<()> {
        self.updates.lock().unwrap().push(menu_ids.to_vec());
        if self.fail_updates {
            return Err(AppError::Internal("menu storage unavailable".to_string()));
        }
        Ok(())
    }
}
