use cloud_gateway::config::GatewayConfig;
use cloud_gateway::infrastructure::{aws, logging, shutdown};
use cloud_gateway::{AppState, create_app};
use dotenvy::dotenv;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::init_tracing("cloud_gateway=info,tower_http=info");

    info!("🚀 Starting Cloud Gateway...");

    let config = GatewayConfig::from_env()?;
    info!("🌍 AWS Region: {}", config.aws_region);
    info!(
        "📦 Max upload size: {}MB",
        config.max_upload_size / 1024 / 1024
    );

    let clients = aws::setup_clients(&config).await;

    let state = AppState {
        config: config.clone(),
        storage: clients.storage,
        queue: clients.queue,
        secrets: clients.secrets,
    };

    let app = create_app(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            })
            .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                info!("📥 {} {}", request.method(), request.uri());
            })
            .on_response(
                |response: &axum::http::Response<_>,
                 latency: std::time::Duration,
                 _span: &tracing::Span| {
                    info!(
                        "📤 Finished in {:?} with status {}",
                        latency,
                        response.status()
                    );
                },
            ),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("✅ Server ready at http://{}", addr);
    info!("📖 Swagger UI: http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    info!("🛑 Server shut down gracefully.");
    Ok(())
}
