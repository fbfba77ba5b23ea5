use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::ResponseMode;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::movies::model::{decode_movie, decode_movie_lenient, Movie};

fn decode_body(mode: ResponseMode, body: &[u8]) -> Result<Movie, ApiError> {
    match mode {
        ResponseMode::Strict => decode_movie(body),
        ResponseMode::Legacy => Ok(decode_movie_lenient(body)),
    }
}

/// GET /api/movies
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.store.list())
}

/// GET /api/movies/{id}
pub async fn get_movie(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id) {
        Some(movie) => Json(movie).into_response(),
        None => {
            tracing::debug!(id = %id, "Movie not found");
            match state.mode {
                ResponseMode::Legacy => Json(Movie::default()).into_response(),
                ResponseMode::Strict => ApiError::NotFound(id).into_response(),
            }
        }
    }
}

/// POST /api/movies
pub async fn create_movie(State(state): State<AppState>, body: Bytes) -> Response {
    let movie = match decode_body(state.mode, &body) {
        Ok(movie) => movie,
        Err(e) => return e.into_response(),
    };

    let created = state.store.create(movie);
    tracing::info!(id = %created.id, title = %created.title, "Movie created");

    match state.mode {
        ResponseMode::Legacy => Json(created).into_response(),
        ResponseMode::Strict => (StatusCode::CREATED, Json(created)).into_response(),
    }
}

/// PUT /api/movies/{id}
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let movie = match decode_body(state.mode, &body) {
        Ok(movie) => movie,
        Err(e) => return e.into_response(),
    };

    match state.store.update(&id, movie) {
        Ok(updated) => {
            tracing::info!(id = %updated.id, title = %updated.title, "Movie updated");
            Json(updated).into_response()
        }
        Err(movies) => {
            tracing::debug!(id = %id, "Update target missing");
            match state.mode {
                ResponseMode::Legacy => Json(movies).into_response(),
                ResponseMode::Strict => ApiError::NotFound(id).into_response(),
            }
        }
    }
}

/// DELETE /api/movies/{id}
pub async fn delete_movie(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.delete_and_list(&id) {
        (Some(removed), remaining) => {
            tracing::info!(id = %removed.id, title = %removed.title, "Movie deleted");
            Json(remaining).into_response()
        }
        (None, remaining) => {
            tracing::debug!(id = %id, "Delete target missing");
            match state.mode {
                ResponseMode::Legacy => Json(remaining).into_response(),
                ResponseMode::Strict => ApiError::NotFound(id).into_response(),
            }
        }
    }
}
