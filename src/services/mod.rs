pub mod auth;
pub mod menu;

pub use auth::{AuthService, Claims};
pub use menu::{menu_json, DbMenuUpdater, MenuUpdater};
