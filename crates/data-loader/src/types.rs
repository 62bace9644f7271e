//! Core record types for the movie catalog and rating history.
//!
//! The loader hands these records to the graph layer; they are the only
//! shapes the rest of the system knows about. Movie ids are negated on the
//! way in so that movies and users occupy disjoint halves of a single
//! integer id space (movies < 0, users > 0) and can share one vertex map.

use serde::{Deserialize, Serialize};

/// Unique identifier for a user (always positive).
pub type UserId = i64;

/// Unique identifier for a movie (always negative once loaded).
pub type MovieId = i64;

/// A cleaned movie row from the catalog file, with the ids of every user
/// who rated it attached by [`crate::load_dataset`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    /// Genre names in catalog order.
    pub genres: Vec<String>,
    /// Catalog-supplied average rating on a 0-10 scale.
    pub avg_rating: f32,
    /// Catalog-supplied number of votes behind `avg_rating`.
    pub vote_count: u32,
    /// Users who rated this movie, in rating-file order. Empty until the
    /// rating history has been joined in.
    pub rater_ids: Vec<UserId>,
}

/// A single cleaned (user, movie, rating) event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RatingRecord {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value on the rating file's 0-5 scale.
    pub rating: f32,
}

/// Both cleaned files, joined: every movie record carries its rater list,
/// and movies nobody rated have been dropped.
#[derive(Debug)]
pub struct Dataset {
    pub movies: Vec<MovieRecord>,
    pub ratings: Vec<RatingRecord>,
}

impl Dataset {
    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.ratings.len())
    }
}
