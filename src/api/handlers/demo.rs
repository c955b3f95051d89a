use crate::DemoState;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
pub struct HelloResponse {
    pub message: String,
    pub hostname: String,
}

pub async fn hello(State(state): State<DemoState>) -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from Kubernetes!".to_string(),
        hostname: state.hostname.clone(),
    })
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

pub async fn metrics(State(state): State<DemoState>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
