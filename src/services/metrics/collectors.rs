use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use super::registry::{MetricsError, MetricsRegistry};

/// Call-site surface for recording proxy metrics.
///
/// Holds the registry behind an init-once cell plus a runtime enable
/// switch. Every recording method is a silent no-op until `init` has
/// succeeded and while the switch is off, so call sites that race with
/// startup never have to check state themselves.
pub struct ProxyMetrics {
    inner: OnceLock<Arc<MetricsRegistry>>,
    enabled: AtomicBool,
}

impl ProxyMetrics {
    pub fn new() -> Self {
        Self {
            inner: OnceLock::new(),
            enabled: AtomicBool::new(true),
        }
    }

    /// Create the instrument set and install it. A second call fails;
    /// callers that cannot continue without metrics should treat the
    /// error as fatal.
    pub fn init(&self) -> Result<Arc<MetricsRegistry>, MetricsError> {
        let registry = MetricsRegistry::new()?;
        self.inner
            .set(registry.clone())
            .map_err(|_| MetricsError::AlreadyInitialized)?;
        Ok(registry)
    }

    /// The installed registry, if `init` has run.
    pub fn registry(&self) -> Option<Arc<MetricsRegistry>> {
        self.inner.get().cloned()
    }

    /// Toggle recording at runtime. Scraping is unaffected.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    fn active(&self) -> Option<&Arc<MetricsRegistry>> {
        if !self.is_enabled() {
            return None;
        }
        self.inner.get()
    }

    /// Record a proxy-level latency observation in milliseconds.
    pub fn record_proxy_latency(&self, cluster: &str, cmd: &str, ms: f64) {
        if let Some(metrics) = self.active() {
            metrics
                .proxy_timer
                .with_label_values(&[cluster, cmd])
                .observe(ms);
        }
    }

    /// Record a handler-level latency observation in milliseconds.
    pub fn record_handler_latency(&self, cluster: &str, node: &str, cmd: &str, ms: f64) {
        if let Some(metrics) = self.active() {
            metrics
                .handler_timer
                .with_label_values(&[cluster, node, cmd])
                .observe(ms);
        }
    }

    /// Count one observed error against its cause.
    pub fn incr_error(&self, cluster: &str, node: &str, cmd: &str, error: &str) {
        if let Some(metrics) = self.active() {
            metrics
                .proxy_errors
                .with_label_values(&[cluster, node, cmd, error])
                .inc();
        }
    }

    pub fn incr_conn(&self, cluster: &str) {
        if let Some(metrics) = self.active() {
            metrics.proxy_conns.with_label_values(&[cluster]).inc();
        }
    }

    /// The gauge is a live/leave tally and may go negative.
    pub fn decr_conn(&self, cluster: &str) {
        if let Some(metrics) = self.active() {
            metrics.proxy_conns.with_label_values(&[cluster]).dec();
        }
    }

    pub fn incr_version(&self, appid: &str, version: &str) {
        if let Some(metrics) = self.active() {
            metrics.versions.with_label_values(&[appid, version]).inc();
        }
    }

    pub fn decr_version(&self, appid: &str, version: &str) {
        if let Some(metrics) = self.active() {
            metrics.versions.with_label_values(&[appid, version]).dec();
        }
    }
}

impl Default for ProxyMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Timer helper for measuring latencies in milliseconds
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for MetricsTimer {
    fn default() -> Self {
        Self::new()
    }
}
