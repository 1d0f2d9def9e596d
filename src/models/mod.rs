pub mod collection;
pub mod menu;
pub mod product;
pub mod user;

pub use collection::*;
pub use menu::*;
pub use product::*;
pub use user::*;
