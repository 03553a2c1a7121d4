pub mod collectors;
pub mod registry;

pub use collectors::{MetricsTimer, ProxyMetrics};
pub use registry::{MetricsError, MetricsRegistry};

use lazy_static::lazy_static;

lazy_static! {
    /// Process-wide metrics handle shared by every call site.
    /// Initialized once at startup; recording is a no-op before that.
    pub static ref METRICS: ProxyMetrics = ProxyMetrics::new();
}
