use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: i32,
    pub name: String,
    pub json_content: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i32,
    pub menu_id: i32,
    pub name: String,
    pub url: Option<String>,
    pub collection_id: Option<i32>,
    pub sort_order: i32,
}
