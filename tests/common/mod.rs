#![allow(dead_code)]

pub mod app;
pub mod factory;
pub mod menus;

pub use app::TestApp;
pub use factory::{Factory, TestAuth};
pub use menus::RecordingMenuUpdater;
