use axum_test::TestServer;
use overlord_metrics::create_app;
use overlord_metrics::services::metrics::ProxyMetrics;
use serial_test::serial;

// =============================================================================
// INTEGRATION TESTS - SCRAPE ENDPOINT
// =============================================================================

#[serial]
#[tokio::test]
async fn test_metrics_endpoint_serves_exposition_format() {
    let metrics = ProxyMetrics::new();
    let registry = metrics.init().unwrap();

    metrics.incr_conn("default");
    metrics.incr_version("app1", "1.0");
    metrics.incr_error("default", "node1", "get", "timeout");
    metrics.record_proxy_latency("default", "get", 4.0);
    metrics.record_handler_latency("default", "node1", "get", 4.0);

    let server = TestServer::new(create_app(registry)).unwrap();
    let response = server.get("/metrics").await;

    response.assert_status_ok();

    let content_type = response.header("content-type");
    assert!(content_type
        .to_str()
        .unwrap()
        .starts_with("text/plain; version=0.0.4"));

    let body = response.text();
    assert!(body.contains("overlord_proxy_conns"));
    assert!(body.contains("overlord_version"));
    assert!(body.contains("overlord_proxy_err"));
    assert!(body.contains("overlord_proxy_timer"));
    assert!(body.contains("overlord_proxy_handler_timer"));
    assert!(body.contains("# TYPE overlord_proxy_timer histogram"));
}

#[serial]
#[tokio::test]
async fn test_metrics_endpoint_reflects_updates_between_scrapes() {
    let metrics = ProxyMetrics::new();
    let registry = metrics.init().unwrap();
    let server = TestServer::new(create_app(registry)).unwrap();

    metrics.incr_conn("c1");
    let first = server.get("/metrics").await.text();
    assert!(first.contains("overlord_proxy_conns{cluster=\"c1\"} 1"));

    metrics.incr_conn("c1");
    let second = server.get("/metrics").await.text();
    assert!(second.contains("overlord_proxy_conns{cluster=\"c1\"} 2"));
}

#[serial]
#[tokio::test]
async fn test_health_endpoint() {
    let metrics = ProxyMetrics::new();
    let registry = metrics.init().unwrap();
    let server = TestServer::new(create_app(registry)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert!(response.text().contains("\"status\":\"ok\""));
}
