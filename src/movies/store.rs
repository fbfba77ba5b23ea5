//! In-memory movie store.
//!
//! # Design Decisions
//! - A single mutex guards the sequence and the id generator; every
//!   operation is atomic with respect to the others
//! - Order reflects insertion history: updates move a record to the end
//! - Lookups are linear scans with exact, case-sensitive id comparison

use std::sync::{Mutex, MutexGuard};

use crate::movies::ids::{IdGenerator, IdStrategy};
use crate::movies::model::{seed_movies, Movie};
use crate::observability::metrics;

struct StoreInner {
    movies: Vec<Movie>,
    ids: IdGenerator,
}

impl StoreInner {
    fn position(&self, id: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.id == id)
    }
}

/// Ordered collection of movies shared by all handlers.
pub struct MovieStore {
    inner: Mutex<StoreInner>,
}

impl MovieStore {
    /// Create an empty store.
    pub fn new(strategy: IdStrategy) -> Self {
        Self::with_movies(strategy, Vec::new())
    }

    /// Create a store holding the four seed records.
    pub fn seeded(strategy: IdStrategy) -> Self {
        Self::with_movies(strategy, seed_movies())
    }

    pub fn with_movies(strategy: IdStrategy, movies: Vec<Movie>) -> Self {
        let ids = IdGenerator::new(strategy, movies.iter().map(|m| m.id.as_str()));
        metrics::record_store_size(movies.len());
        Self {
            inner: Mutex::new(StoreInner { movies, ids }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().expect("movie store mutex poisoned")
    }

    /// Snapshot of every movie in store order.
    pub fn list(&self) -> Vec<Movie> {
        self.lock().movies.clone()
    }

    /// First movie whose id matches exactly.
    pub fn get(&self, id: &str) -> Option<Movie> {
        let inner = self.lock();
        inner.position(id).map(|i| inner.movies[i].clone())
    }

    /// Assign a fresh id to `movie` and append it.
    pub fn create(&self, mut movie: Movie) -> Movie {
        let mut inner = self.lock();
        let StoreInner { movies, ids } = &mut *inner;
        movie.id = ids.next_id(|candidate| movies.iter().any(|m| m.id == candidate));
        movies.push(movie.clone());
        metrics::record_store_size(movies.len());
        movie
    }

    /// Replace the movie with `id`, moving it to the end of the store.
    ///
    /// The stored record always carries `id`, whatever `movie.id` held.
    /// When nothing matches the store is untouched and `Err` carries a
    /// snapshot taken under the same lock.
    pub fn update(&self, id: &str, mut movie: Movie) -> Result<Movie, Vec<Movie>> {
        let mut inner = self.lock();
        let Some(index) = inner.position(id) else {
            return Err(inner.movies.clone());
        };
        inner.movies.remove(index);
        movie.id = id.to_string();
        inner.movies.push(movie.clone());
        metrics::record_store_size(inner.movies.len());
        Ok(movie)
    }

    /// Remove the first movie with `id`.
    pub fn delete(&self, id: &str) -> Option<Movie> {
        self.delete_and_list(id).0
    }

    /// Remove the first movie with `id` and snapshot what remains, in one
    /// lock section.
    pub fn delete_and_list(&self, id: &str) -> (Option<Movie>, Vec<Movie>) {
        let mut inner = self.lock();
        let removed = inner.position(id).map(|index| inner.movies.remove(index));
        if removed.is_some() {
            metrics::record_store_size(inner.movies.len());
        }
        (removed, inner.movies.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().movies.is_empty()
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.lock().ids.strategy()
    }
}

impl Default for MovieStore {
    fn default() -> Self {
        Self::seeded(IdStrategy::default())
    }
}
