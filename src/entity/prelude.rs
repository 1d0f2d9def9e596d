pub use super::collection::Entity as CollectionEntity;
pub use super::collection_product::Entity as CollectionProductEntity;
pub use super::menu::Entity as MenuEntity;
pub use super::menu_item::Entity as MenuItemEntity;
pub use super::product::Entity as ProductEntity;
pub use super::user::Entity as UserEntity;
