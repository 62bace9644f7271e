//! Online review ingestion.
//!
//! A review is a (title, rating) pair from the current user. Applying one
//! mutates the graph in place: the movie's running mean is updated (or the
//! movie is created), a fresh synthetic user vertex is allocated, and
//! exactly one edge links the two.
//!
//! Id allocation reads the store's max-id watermarks, so reviews must be
//! applied one at a time; the store is not safe for concurrent mutation.

use crate::error::{GraphError, Result};
use crate::store::GraphStore;
use data_loader::{MovieId, UserId};
use tracing::debug;

/// What a submitted review did to the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewReceipt {
    pub movie_id: MovieId,
    /// The synthetic reviewer allocated for this review.
    pub user_id: UserId,
    /// True when the title was new and a movie vertex was created.
    pub created_movie: bool,
    /// The movie's average after this review.
    pub avg_rating: f32,
    /// The movie's rater count after this review.
    pub num_raters: u32,
}

impl GraphStore {
    /// Apply a review to the graph.
    ///
    /// For a known title the running mean is recomputed exactly:
    /// `avg = (avg * n + rating) / (n + 1)`. No Welford-style
    /// stabilization is used; `num_raters` and `avg_rating` are always
    /// updated together, which keeps the mean exact at this scale.
    ///
    /// For an unknown title a movie vertex is created with this rating as
    /// its average and a rater count of 1. New movie ids continue the raw
    /// catalog id sequence (stored negated), so they stay inside the movie
    /// half of the id space.
    pub fn submit_review(&mut self, title: &str, rating: f32) -> Result<ReviewReceipt> {
        if !(0.0..=10.0).contains(&rating) {
            return Err(GraphError::InvalidRating { value: rating });
        }

        let (movie_id, created_movie, avg_rating, num_raters) =
            match self.movie_id_by_title(title) {
                Some(id) => {
                    let movie = self
                        .movie_mut(id)
                        .ok_or(GraphError::VertexNotFound { id })?;
                    let total = movie.avg_rating * movie.num_raters as f32 + rating;
                    movie.num_raters += 1;
                    movie.avg_rating = total / movie.num_raters as f32;
                    (id, false, movie.avg_rating, movie.num_raters)
                }
                None => {
                    let id = -(self.max_raw_movie_id + 1);
                    self.add_movie_vertex(id, title, rating, 1, Vec::new())?;
                    (id, true, rating, 1)
                }
            };

        let user_id = self.max_user_id + 1;
        self.add_user_vertex(user_id)?;
        self.add_edge(user_id, movie_id)?;

        debug!(
            "review applied: movie {} (created: {}), reviewer {}, avg {:.2} over {}",
            movie_id, created_movie, user_id, avg_rating, num_raters
        );

        Ok(ReviewReceipt {
            movie_id,
            user_id,
            created_movie,
            avg_rating,
            num_raters,
        })
    }
}
