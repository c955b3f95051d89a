use crate::services::metrics::{RequestMetrics, UNMATCHED_ENDPOINT};
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::debug;

pub async fn metrics_middleware(
    State(metrics): State<RequestMetrics>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_string());

    let response = next.run(req).await;

    let latency = start.elapsed();
    metrics.observe(&endpoint, method.as_str(), latency);

    debug!(
        target: "metrics",
        method = %method,
        endpoint = %endpoint,
        status = %response.status().as_u16(),
        latency_ms = %latency.as_millis(),
        "request_completed"
    );

    response
}
