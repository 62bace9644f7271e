//! Tiered candidate selection.
//!
//! Turns the scored users into a candidate movie set, preferring the
//! watch histories of the most similar users.
//!
//! ## Algorithm
//! 1. Union the rated-movie sets of all affinity-3 users
//! 2. While the set is still below the floor (50), widen to affinity-2,
//!    then affinity-1 users
//! 3. If still short, top up with a uniform random sample of the catalog
//! 4. The three seed movies are excluded throughout, so the floor holds on
//!    the final set whenever the catalog is large enough
//!
//! The result is a set, not a ranking; ordering happens downstream in the
//! genre filter.

use crate::catalog;
use crate::scoring::LIKED_MOVIE_COUNT;
use data_loader::{MovieId, UserId};
use graph::GraphStore;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// The selector keeps widening tiers until it has this many candidates.
pub const MIN_CANDIDATES: usize = 50;

/// Assembles the candidate movie set from scored users.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationSelector {
    min_candidates: usize,
}

impl RecommendationSelector {
    pub fn new() -> Self {
        Self {
            min_candidates: MIN_CANDIDATES,
        }
    }

    /// Configure the candidate floor (default: 50)
    pub fn with_min_candidates(mut self, min: usize) -> Self {
        self.min_candidates = min;
        self
    }

    /// Select candidate movies from the scored users.
    ///
    /// Degrades gracefully: with a small catalog the result is simply
    /// whatever is available, never an error.
    #[instrument(skip(self, store, scores))]
    pub fn select(
        &self,
        store: &GraphStore,
        scores: &HashMap<UserId, u8>,
        liked: &[MovieId; LIKED_MOVIE_COUNT],
    ) -> HashSet<MovieId> {
        let mut candidates = HashSet::new();

        self.union_tier(store, scores, liked, 3, &mut candidates);
        if candidates.len() < self.min_candidates {
            self.union_tier(store, scores, liked, 2, &mut candidates);
        }
        if candidates.len() < self.min_candidates {
            self.union_tier(store, scores, liked, 1, &mut candidates);
        }

        if candidates.len() < self.min_candidates {
            let deficit = self.min_candidates - candidates.len();
            let mut exclude = candidates.clone();
            exclude.extend(liked.iter().copied());
            let sample = catalog::random_sample(store, deficit, &exclude);
            debug!("topping up {} candidates with {} sampled movies", candidates.len(), sample.len());
            candidates.extend(sample);
        }

        debug!("selected {} candidate movies", candidates.len());
        candidates
    }

    /// Union the rated movies of every user at exactly this affinity tier,
    /// skipping the seeds.
    fn union_tier(
        &self,
        store: &GraphStore,
        scores: &HashMap<UserId, u8>,
        liked: &[MovieId; LIKED_MOVIE_COUNT],
        tier: u8,
        out: &mut HashSet<MovieId>,
    ) {
        for (&user_id, &score) in scores {
            if score != tier {
                continue;
            }
            if let Some(user) = store.user(user_id) {
                out.extend(
                    user.reviewed_movies
                        .iter()
                        .copied()
                        .filter(|movie_id| !liked.contains(movie_id)),
                );
            }
        }
    }
}

impl Default for RecommendationSelector {
    fn default() -> Self {
        Self::new()
    }
}
