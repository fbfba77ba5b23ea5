//! Movie catalogue: records, storage and the CRUD endpoints.
//!
//! # Data Flow
//! ```text
//! request
//!     → router (method + path)
//!     → handlers.rs (decode body, pick response shape by mode)
//!     → store.rs (locked Vec<Movie>, id generation via ids.rs)
//!     → JSON response
//! ```

pub mod handlers;
pub mod ids;
pub mod model;
pub mod store;

pub use ids::IdStrategy;
pub use model::{Director, Movie};
pub use store::MovieStore;

use axum::{routing::get, Router};

use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_movie_router(state: AppState) -> Router {
    Router::new()
        .route("/api/movies", get(list_movies).post(create_movie))
        .route(
            "/api/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .with_state(state)
}
