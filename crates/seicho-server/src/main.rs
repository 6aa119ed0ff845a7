use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod models;
mod routes;
mod services;

use adapters::PgStateRepository;
use application::ProgressionService;
use services::SystemClock;

/// Type alias for the progression service with concrete adapters
pub type AppProgressionService = ProgressionService<PgStateRepository, SystemClock>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub progression: Arc<AppProgressionService>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Seicho API is running - every small step counts".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🌱 Seicho API initializing...");

    // Initialize API key from secrets
    if let Some(api_key) = secrets.get("SEICHO_API_KEY") {
        auth::init_api_key(api_key);
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No SEICHO_API_KEY set - authentication disabled");
    }

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("✅ Database migrations completed");

    let repo = Arc::new(PgStateRepository::new(pool));
    let clock = Arc::new(SystemClock);
    let state = AppState {
        progression: Arc::new(ProgressionService::new(repo, clock)),
    };

    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(routes::progression::router())
        .layer(middleware::from_fn(auth::auth_middleware));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    // Build router with shared state
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Seicho API ready - progress awaits");

    Ok(router.into())
}
