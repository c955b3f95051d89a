use crate::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub aws_region: String,
    pub bucket_name: String,
    pub queue_url: String,
    pub secret_name: String,
}

/// Liveness plus an echo of the deployment identifiers. Never calls AWS, so it
/// stays 200 when a dependency is down.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health and configuration", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        aws_region: state.config.aws_region.clone(),
        bucket_name: state.config.bucket_name.clone(),
        queue_url: state.config.queue_url.clone(),
        secret_name: state.config.secret_name.clone(),
    })
}
