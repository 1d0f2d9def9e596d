use std::sync::Arc;

use axum_test::TestServer;
use sqlx::PgPool;
use storefront_dashboard::build_router;
use storefront_dashboard::config::Config;
use storefront_dashboard::state::AppState;

use super::RecordingMenuUpdater;

/// Test configuration
pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        database_max_connections: 5,
        jwt_secret: "test-jwt-secret-that-is-at-least-32-characters-long".to_string(),
        jwt_expiration_hours: 24,
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    /// Application over a migrated test database, with database-backed menus
    pub fn new(pool: PgPool) -> Self {
        Self::from_state(AppState::from_pool(pool, test_config()))
    }

    /// Application whose menu collaborator reports `menu_ids` and records calls
    pub fn with_recording_menus(pool: PgPool, menu_ids: Vec<i32>) -> (Self, Arc<RecordingMenuUpdater>) {
        Self::with_menus(pool, RecordingMenuUpdater::new(menu_ids))
    }

    /// Application using the given menu collaborator
    pub fn with_menus(
        pool: PgPool,
        menus: RecordingMenuUpdater,
    ) -> (Self, Arc<RecordingMenuUpdater>) {
        let menus = Arc::new(menus);
        let state = AppState::from_pool(pool, test_config()).with_menus(menus.clone());

        (Self::from_state(state), menus)
    }

    fn from_state(state: AppState) -> Self {
        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, state }
    }
}
