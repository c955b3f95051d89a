use clap::Parser;
use cloud_gateway::config::DemoConfig;
use cloud_gateway::infrastructure::{logging, shutdown};
use cloud_gateway::services::metrics::RequestMetrics;
use cloud_gateway::{DemoState, create_demo_app};
use dotenvy::dotenv;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Kubernetes demo service exposing hello, health and Prometheus metrics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on, overrides PORT
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();
    let mut config = DemoConfig::from_env()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    logging::init_tracing("kube_demo=info,cloud_gateway=info,tower_http=info");

    let state = DemoState::new(RequestMetrics::new()?);
    info!("🚀 Starting Kubernetes demo on host {}", state.hostname);

    let app = create_demo_app(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("✅ Server ready at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    info!("🛑 Server shut down gracefully.");
    Ok(())
}
