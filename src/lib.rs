pub mod config;
pub mod modules;
pub mod services;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use modules::metrics::metrics_routes;
use services::metrics::MetricsRegistry;

pub fn create_app(metrics: Arc<MetricsRegistry>) -> Router {
    metrics_routes(metrics).layer(TraceLayer::new_for_http())
}
