use anyhow::Result;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

/// Label used when a request matched no route.
pub const UNMATCHED_ENDPOINT: &str = "none";

/// Request counter and latency histogram backing the `/metrics` scrape endpoint.
///
/// Each service instance owns its own registry so tests and multiple routers
/// never share series.
#[derive(Clone)]
pub struct RequestMetrics {
    registry: Registry,
    request_count: IntCounterVec,
    request_latency: HistogramVec,
}

impl RequestMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let request_count = IntCounterVec::new(
            Opts::new("http_request_count", "Number of requests received"),
            &["endpoint", "method"],
        )?;
        let request_latency = HistogramVec::new(
            HistogramOpts::new("http_request_latency_seconds", "Request latency in seconds"),
            &["endpoint"],
        )?;

        registry.register(Box::new(request_count.clone()))?;
        registry.register(Box::new(request_latency.clone()))?;
        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            request_count,
            request_latency,
        })
    }

    pub fn observe(&self, endpoint: &str, method: &str, latency: Duration) {
        self.request_latency
            .with_label_values(&[endpoint])
            .observe(latency.as_secs_f64());
        self.request_count
            .with_label_values(&[endpoint, method])
            .inc();
    }

    pub fn request_count(&self, endpoint: &str, method: &str) -> u64 {
        self.request_count
            .with_label_values(&[endpoint, method])
            .get()
    }

    /// Render every registered series in the text exposition format.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
