//! In-memory movie catalogue served over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (request id, trace, metrics, timeout, body limit)
//!                         │
//!                         ▼
//!                     movies router ──▶ movies::handlers ──▶ movies::store (Mutex<Vec<Movie>>)
//!                         │
//!     Client Response     ▼
//!     ◀────────────── JSON body / http::response::ApiError
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod movies;
pub mod observability;

pub use config::ServiceConfig;
pub use http::MovieServer;
pub use lifecycle::Shutdown;
pub use movies::{Director, Movie, MovieStore};
