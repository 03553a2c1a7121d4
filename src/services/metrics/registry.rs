use prometheus::{
    linear_buckets, Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

// Metric names are scraped by existing dashboards; do not rename.
const PROXY_CONNS: &str = "overlord_proxy_conns";
const VERSIONS: &str = "overlord_version";
const PROXY_ERRORS: &str = "overlord_proxy_err";
const PROXY_TIMER: &str = "overlord_proxy_timer";
const HANDLER_TIMER: &str = "overlord_proxy_handler_timer";

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("metrics already initialized")]
    AlreadyInitialized,
    #[error("metric registration failed: {0}")]
    Registration(#[from] prometheus::Error),
    #[error("metrics exposition is not valid utf-8: {0}")]
    Exposition(#[from] std::string::FromUtf8Error),
}

/// Central metrics registry for the proxy platform
pub struct MetricsRegistry {
    registry: Registry,

    /// Open client connections per cluster
    pub proxy_conns: GaugeVec,
    /// Clients currently reporting a given version, per appid
    pub versions: GaugeVec,
    /// Observed errors partitioned by cluster, node, command and cause
    pub proxy_errors: GaugeVec,
    /// Proxy-level latency distribution in milliseconds
    pub proxy_timer: HistogramVec,
    /// Handler-level latency distribution in milliseconds
    pub handler_timer: HistogramVec,
}

impl MetricsRegistry {
    pub fn new() -> Result<Arc<Self>, MetricsError> {
        Self::with_registry(Registry::new())
    }

    /// Register the instrument set with an existing registry.
    /// Fails with `AlreadyReg` if any of the fixed names is already taken.
    pub fn with_registry(registry: Registry) -> Result<Arc<Self>, MetricsError> {
        let proxy_conns = GaugeVec::new(Opts::new(PROXY_CONNS, PROXY_CONNS), &["cluster"])?;
        registry.register(Box::new(proxy_conns.clone()))?;

        let versions = GaugeVec::new(Opts::new(VERSIONS, VERSIONS), &["appid", "version"])?;
        registry.register(Box::new(versions.clone()))?;

        let proxy_errors = GaugeVec::new(
            Opts::new(PROXY_ERRORS, PROXY_ERRORS),
            &["cluster", "node", "cmd", "error"],
        )?;
        registry.register(Box::new(proxy_errors.clone()))?;

        let proxy_timer = HistogramVec::new(
            HistogramOpts::new(PROXY_TIMER, PROXY_TIMER)
                .buckets(linear_buckets(0.0, 10.0, 10)?),
            &["cluster", "cmd"],
        )?;
        registry.register(Box::new(proxy_timer.clone()))?;

        let handler_timer = HistogramVec::new(
            HistogramOpts::new(HANDLER_TIMER, HANDLER_TIMER)
                .buckets(linear_buckets(0.0, 10.0, 10)?),
            &["cluster", "node", "cmd"],
        )?;
        registry.register(Box::new(handler_timer.clone()))?;

        Ok(Arc::new(Self {
            registry,
            proxy_conns,
            versions,
            proxy_errors,
            proxy_timer,
            handler_timer,
        }))
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Get the underlying registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
