use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Validated collection input, ready to be written
#[derive(Debug, Clone)]
pub struct CollectionInput {
    pub name: String,
    pub slug: String,
    pub product_ids: Vec<i32>,
}
