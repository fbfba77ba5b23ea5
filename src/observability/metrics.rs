//! Metrics collection and exposition.
//!
//! # Metrics
//! - `movie_api_requests_total` (counter): requests by method, status
//! - `movie_api_request_duration_seconds` (histogram): latency distribution
//! - `movie_api_store_size` (gauge): movies currently held
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter only runs when enabled in config

use std::net::SocketAddr;
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "movie_api_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("movie_api_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_store_size(len: usize) {
    metrics::gauge!("movie_api_store_size").set(len as f64);
}

/// Middleware recording count and latency of every request.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use metrics_exporter_prometheus::PrometheusRecorder;
    use tower::ServiceExt;

    fn recorder() -> PrometheusRecorder {
        PrometheusBuilder::new().build_recorder()
    }

    #[test]
    fn test_store_size_gauge() {
        let recorder = recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, || {
            record_store_size(4);
            record_store_size(3);
        });
        assert!(handle.render().contains("movie_api_store_size 3"));
    }

    // Current-thread runtime keeps the thread-local recorder in scope.
    #[tokio::test]
    async fn test_track_requests_labels() {
        let recorder = recorder();
        let handle = recorder.handle();
        let _guard = metrics::set_default_local_recorder(&recorder);

        let app = Router::new()
            .route("/api/movies", get(|| async { "[]" }))
            .layer(middleware::from_fn(track_requests));
        for uri in ["/api/movies", "/api/movies", "/missing"] {
            let request = axum::http::Request::get(uri).body(Body::empty()).unwrap();
            app.clone().oneshot(request).await.unwrap();
        }

        let rendered = handle.render();
        let line = |status: &str| {
            rendered
                .lines()
                .find(|l| {
                    l.starts_with("movie_api_requests_total{")
                        && l.contains("method=\"GET\"")
                        && l.contains(&format!("status=\"{status}\""))
                })
                .map(|l| l.rsplit(' ').next().unwrap_or_default().to_string())
        };
        assert_eq!(line("200").as_deref(), Some("2"));
        assert_eq!(line("404").as_deref(), Some("1"));
        assert!(rendered.contains("movie_api_request_duration_seconds"));
    }
}
