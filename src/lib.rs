pub mod api;
pub mod config;
pub mod infrastructure;
pub mod services;

use crate::config::GatewayConfig;
use crate::services::metrics::RequestMetrics;
use crate::services::queue::QueueService;
use crate::services::secrets::SecretService;
use crate::services::storage::StorageService;
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::health::health_check,
        api::handlers::upload::upload_file,
        api::handlers::messages::send_message,
        api::handlers::messages::receive_message,
        api::handlers::secrets::get_secret,
    ),
    components(
        schemas(
            api::handlers::health::HealthResponse,
            api::handlers::upload::UploadResponse,
            api::handlers::messages::SendMessageResponse,
            api::handlers::messages::ReceiveMessageResponse,
            api::handlers::secrets::SecretResponse,
        )
    ),
    tags(
        (name = "system", description = "Health and configuration"),
        (name = "storage", description = "Object storage uploads"),
        (name = "queue", description = "Queue send and receive"),
        (name = "secrets", description = "Secret store access")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub storage: Arc<dyn StorageService>,
    pub queue: Arc<dyn QueueService>,
    pub secrets: Arc<dyn SecretService>,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/upload", post(api::handlers::upload::upload_file))
        .route(
            "/message",
            post(api::handlers::messages::send_message)
                .get(api::handlers::messages::receive_message),
        )
        .route("/secret", get(api::handlers::secrets::get_secret))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(
            state.config.max_upload_size,
        ))
        .with_state(state)
}

#[derive(Clone)]
pub struct DemoState {
    pub metrics: RequestMetrics,
    pub hostname: String,
}

impl DemoState {
    pub fn new(metrics: RequestMetrics) -> Self {
        Self {
            metrics,
            hostname: gethostname::gethostname().to_string_lossy().into_owned(),
        }
    }
}

/// Router for the Kubernetes demo service. Every request, including the
/// scrape itself, is counted.
pub fn create_demo_app(state: DemoState) -> Router {
    Router::new()
        .route("/", get(api::handlers::demo::hello))
        .route("/health", get(api::handlers::demo::health))
        .route("/metrics", get(api::handlers::demo::metrics))
        .layer(from_fn_with_state(
            state.metrics.clone(),
            api::middleware::metrics::metrics_middleware,
        ))
        .with_state(state)
}
