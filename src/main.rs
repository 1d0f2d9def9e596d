use anyhow::Context;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use storefront_dashboard::config::Config;
use storefront_dashboard::forms::CollectionFormData;
use storefront_dashboard::handlers::{
    AuthResponse, CollectionDeleteResponse, CollectionFormResponse, CollectionListResponse,
    CollectionResponse, FormState, LoginRequest, PublishResponse,
};
use storefront_dashboard::models::UserResponse;
use storefront_dashboard::state::AppState;
use storefront_dashboard::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::me,
        handlers::collection::list_collections,
        handlers::collection::collection_add_form,
        handlers::collection::create_collection,
        handlers::collection::collection_update_form,
        handlers::collection::update_collection,
        handlers::collection::collection_delete_confirm,
        handlers::collection::delete_collection,
        handlers::collection::toggle_collection_published,
    ),
    components(schemas(
        LoginRequest,
        AuthResponse,
        UserResponse,
        CollectionResponse,
        CollectionListResponse,
        CollectionFormData,
        FormState,
        CollectionFormResponse,
        CollectionDeleteResponse,
        PublishResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Collections", description = "Dashboard collection management")
    )
)]
struct ApiDoc;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,sqlx=warn"));

    // LOG_FORMAT=json for machine-readable output
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("Failed to load configuration")?;
    let addr = config.server_addr();

    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!("Database connection established");

    let app = build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
