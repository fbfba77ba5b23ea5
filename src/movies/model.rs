//! Movie record types and their JSON shape.

use serde::{Deserialize, Serialize};

use crate::http::response::ApiError;

/// A movie record.
///
/// Missing fields decode to empty values so partial bodies are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub id: String,
    pub isbn: String,
    pub title: String,
    /// Serialized as `null` when absent.
    pub director: Option<Director>,
}

/// Director embedded in a [`Movie`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Director {
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
}

impl Director {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl Movie {
    pub fn new(
        id: impl Into<String>,
        isbn: impl Into<String>,
        title: impl Into<String>,
        director: Director,
    ) -> Self {
        Self {
            id: id.into(),
            isbn: isbn.into(),
            title: title.into(),
            director: Some(director),
        }
    }

    /// True for the record returned in place of a missing movie.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.isbn.is_empty()
            && self.title.is_empty()
            && self.director.is_none()
    }
}

/// The four records every seeded store starts with.
pub fn seed_movies() -> Vec<Movie> {
    vec![
        Movie::new("1", "123456", "Spider Man", Director::new("John", "Doe")),
        Movie::new("2", "654321", "Super Man", Director::new("Steve", "Smith")),
        Movie::new("3", "987654", "Ant Man", Director::new("Jane", "Doe")),
        Movie::new("4", "456789", "Iron Man", Director::new("Tom", "Hanks")),
    ]
}

/// Decode a request body, rejecting anything that is not a movie object.
pub fn decode_movie(body: &[u8]) -> Result<Movie, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))
}

/// Decode a request body, falling back to the empty record on failure.
pub fn decode_movie_lenient(body: &[u8]) -> Movie {
    match decode_movie(body) {
        Ok(movie) => movie,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring undecodable movie body");
            Movie::default()
        }
    }
}
