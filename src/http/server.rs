//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the movie endpoints
//! - Wire up middleware (request ID, tracing, metrics, timeout, body limit)
//! - Bind server to listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{ResponseMode, ServiceConfig};
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::shutdown;
use crate::movies::{setup_movie_router, MovieStore};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MovieStore>,
    pub mode: ResponseMode,
}

/// HTTP server for the movie API.
pub struct MovieServer {
    router: Router,
    config: ServiceConfig,
    store: Arc<MovieStore>,
}

impl MovieServer {
    /// Create a server with a fresh store built from the configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let store = if config.api.seed {
            MovieStore::seeded(config.api.id_strategy)
        } else {
            MovieStore::new(config.api.id_strategy)
        };
        Self::with_store(config, Arc::new(store))
    }

    /// Create a server around an existing store.
    pub fn with_store(config: ServiceConfig, store: Arc<MovieStore>) -> Self {
        let state = AppState {
            store: store.clone(),
            mode: config.api.mode,
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            store,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        setup_movie_router(state)
            .layer(RequestBodyLimitLayer::new(config.api.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// Router with middleware applied, for driving the service in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn store(&self) -> Arc<MovieStore> {
        self.store.clone()
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = ?self.config.api.mode,
            id_strategy = ?self.config.api.id_strategy,
            movies = self.store.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
