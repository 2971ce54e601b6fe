//! Movie metadata collaborator.
//!
//! The live implementation talks to a remote movie database and is supplied by
//! the embedding application. [`BundledCatalog`] answers from the cast lists
//! shipped with the daily challenge pairs and doubles as the offline fallback.

use crate::error::MetadataError;
use crate::game::challenge_pairs::bundled_pairs;
use crate::model::{Actor, ActorId, MovieId, MovieRecord};

pub trait MovieMetadata {
    fn actors_for_movie(&self, movie_id: MovieId) -> Result<Vec<Actor>, MetadataError>;

    fn movies_for_actor(&self, actor_id: ActorId) -> Result<Vec<MovieRecord>, MetadataError>;
}

#[derive(Debug, Clone)]
pub struct BundledCatalog {
    movies: Vec<MovieRecord>,
}

impl Default for BundledCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl BundledCatalog {
    pub fn new() -> Self {
        let mut movies: Vec<MovieRecord> = Vec::new();
        for pair in bundled_pairs() {
            for movie in [pair.start, pair.target] {
                if !movies.iter().any(|m| m.id == movie.id) {
                    movies.push(movie);
                }
            }
        }
        Self { movies }
    }

    pub fn movie(&self, movie_id: MovieId) -> Option<&MovieRecord> {
        self.movies.iter().find(|m| m.id == movie_id)
    }
}

impl MovieMetadata for BundledCatalog {
    fn actors_for_movie(&self, movie_id: MovieId) -> Result<Vec<Actor>, MetadataError> {
        self.movie(movie_id)
            .and_then(|movie| movie.actors.clone())
            .ok_or(MetadataError::NotFound {
                kind: "movie",
                id: movie_id,
            })
    }

    fn movies_for_actor(&self, actor_id: ActorId) -> Result<Vec<MovieRecord>, MetadataError> {
        let movies: Vec<MovieRecord> = self
            .movies
            .iter()
            .filter(|movie| {
                movie
                    .actors
                    .iter()
                    .flatten()
                    .any(|actor| actor.id == actor_id)
            })
            .map(|movie| MovieRecord {
                actors: None,
                ..movie.clone()
            })
            .collect();
        if movies.is_empty() {
            return Err(MetadataError::NotFound {
                kind: "actor",
                id: actor_id,
            });
        }
        Ok(movies)
    }
}
