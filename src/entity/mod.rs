pub mod collection;
pub mod collection_product;
pub mod menu;
pub mod menu_item;
pub mod product;
pub mod user;

pub mod prelude;

pub use prelude::*;
