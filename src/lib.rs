// Library crate for the storefront dashboard
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod urls;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    collection_add_form, collection_delete_confirm, collection_update_form, create_collection,
    delete_collection, list_collections, login, me, toggle_collection_published,
    update_collection,
};
use crate::middlewares::{auth_middleware, staff_middleware};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Dashboard routes (staff only)
    let dashboard_routes = Router::new()
        .route(urls::COLLECTION_LIST, get(list_collections))
        .route(
            urls::COLLECTION_ADD,
            get(collection_add_form).post(create_collection),
        )
        .route(
            urls::COLLECTION_UPDATE,
            get(collection_update_form).post(update_collection),
        )
        .route(
            urls::COLLECTION_DELETE,
            get(collection_delete_confirm).post(delete_collection),
        )
        .route(urls::COLLECTION_PUBLISH, post(toggle_collection_published))
        .route_layer(middleware::from_fn(staff_middleware));

    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .merge(dashboard_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(|| async { "Storefront dashboard" }))
        // Public auth routes
        .route("/api/auth/login", post(login))
        // Protected routes
        .merge(protected_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
