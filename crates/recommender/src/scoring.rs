//! Co-rating similarity scoring.
//!
//! "Similar users" are found by counting, not by traversal: every user's
//! rated-movie id set is already maintained on their vertex, so one pass
//! over the user vertices scores everyone against the three liked movies.
//!
//! ## Algorithm
//! 1. For each user in the graph, count how many of the 3 liked movie ids
//!    appear in their rated set (affinity score, 0..=3)
//! 2. Keep users with score >= 1
//!
//! The score map is created fresh on every call and dropped by the caller.
//! Nothing is written to the vertices, so back-to-back queries against the
//! same store cannot accumulate stale scores.

use data_loader::{MovieId, UserId};
use graph::GraphStore;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Number of liked movies that seed every recommendation query.
pub const LIKED_MOVIE_COUNT: usize = 3;

/// Scores users by how many of the liked movies they also rated.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer;

impl SimilarityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score every user against the three liked movie ids.
    ///
    /// Returns an ephemeral map from user id to affinity score; only users
    /// with at least one shared movie appear.
    #[instrument(skip(self, store))]
    pub fn score_users(
        &self,
        store: &GraphStore,
        liked: &[MovieId; LIKED_MOVIE_COUNT],
    ) -> HashMap<UserId, u8> {
        let mut scores = HashMap::new();

        for user in store.users() {
            let score = liked
                .iter()
                .filter(|movie_id| user.reviewed_movies.contains(*movie_id))
                .count() as u8;
            if score >= 1 {
                scores.insert(user.id, score);
            }
        }

        debug!("scored {} users with affinity >= 1", scores.len());
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> GraphStore {
        let mut store = GraphStore::new();
        for id in 1..=4 {
            store
                .add_movie_vertex(-id, &format!("Movie {}", id), 7.0, 1, Vec::new())
                .unwrap();
        }
        // User 1 rated all three liked movies, user 2 two of them,
        // user 3 one, user 4 none of them.
        let edges: [(i64, &[i64]); 4] = [
            (1, &[-1, -2, -3]),
            (2, &[-1, -2]),
            (3, &[-3, -4]),
            (4, &[-4]),
        ];
        for (user_id, movies) in edges {
            store.add_user_vertex(user_id).unwrap();
            for &movie_id in movies {
                store.add_edge(user_id, movie_id).unwrap();
            }
        }
        store
    }

    #[test]
    fn test_scores_count_shared_movies() {
        let store = create_test_store();
        let scores = SimilarityScorer::new().score_users(&store, &[-1, -2, -3]);

        assert_eq!(scores.get(&1), Some(&3));
        assert_eq!(scores.get(&2), Some(&2));
        assert_eq!(scores.get(&3), Some(&1));
        // Users sharing nothing are absent, not zero.
        assert!(!scores.contains_key(&4));
    }

    #[test]
    fn test_repeated_queries_do_not_accumulate() {
        let store = create_test_store();
        let scorer = SimilarityScorer::new();

        let first = scorer.score_users(&store, &[-1, -2, -3]);
        let second = scorer.score_users(&store, &[-1, -2, -3]);

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_store_scores_nobody() {
        let store = GraphStore::new();
        let scores = SimilarityScorer::new().score_users(&store, &[-1, -2, -3]);
        assert!(scores.is_empty());
    }
}
