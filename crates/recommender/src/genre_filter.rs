//! Genre-constrained ranking of the candidate set.
//!
//! ## Algorithm
//! 1. Partition candidates into genre matches and the rest
//! 2. Sort the matches by average rating, best first
//! 3. Take the first 3
//! 4. If fewer than 3 matched, re-rank the whole candidate set by rating
//!    and pad with the best movies not already chosen
//!
//! Candidate ids are normalized (sorted) before ranking and the rating
//! sort is stable, so equal ratings always rank in the same order.

use data_loader::MovieId;
use graph::{GraphStore, MovieVertex};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// One ranked recommendation, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMovie {
    pub title: String,
    pub genres: Vec<String>,
    pub avg_rating: f32,
}

impl RankedMovie {
    fn from_vertex(movie: &MovieVertex) -> Self {
        Self {
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            avg_rating: movie.avg_rating,
        }
    }
}

/// Ranks a candidate set within a requested genre.
#[derive(Debug, Clone, Copy)]
pub struct GenreFilter {
    result_count: usize,
}

impl GenreFilter {
    pub fn new() -> Self {
        Self { result_count: 3 }
    }

    /// Configure how many recommendations to return (default: 3)
    pub fn with_result_count(mut self, count: usize) -> Self {
        self.result_count = count;
        self
    }

    /// Rank the candidates, genre matches first, best rating first.
    ///
    /// Returns at most `result_count` movies; fewer only when the whole
    /// candidate set is smaller than that.
    pub fn rank_top(
        &self,
        store: &GraphStore,
        candidates: &HashSet<MovieId>,
        genre: &str,
    ) -> Vec<RankedMovie> {
        let mut ids: Vec<MovieId> = candidates.iter().copied().collect();
        ids.sort_unstable();
        let movies: Vec<&MovieVertex> = ids.iter().filter_map(|&id| store.movie(id)).collect();

        let mut matching: Vec<&MovieVertex> = movies
            .iter()
            .copied()
            .filter(|movie| movie.genres.iter().any(|g| g == genre))
            .collect();
        matching.sort_by(by_rating_desc);

        let chosen: Vec<&MovieVertex> = matching.into_iter().take(self.result_count).collect();
        let mut ranked: Vec<RankedMovie> =
            chosen.iter().map(|movie| RankedMovie::from_vertex(movie)).collect();

        if ranked.len() < self.result_count {
            debug!(
                "only {} movies match genre {:?}, padding by rating",
                ranked.len(),
                genre
            );
            let chosen_ids: HashSet<MovieId> = chosen.iter().map(|movie| movie.id).collect();
            let mut rest: Vec<&MovieVertex> = movies
                .iter()
                .copied()
                .filter(|movie| !chosen_ids.contains(&movie.id))
                .collect();
            rest.sort_by(by_rating_desc);
            ranked.extend(
                rest.into_iter()
                    .take(self.result_count - ranked.len())
                    .map(RankedMovie::from_vertex),
            );
        }

        ranked
    }
}

impl Default for GenreFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn by_rating_desc(a: &&MovieVertex, b: &&MovieVertex) -> Ordering {
    b.avg_rating
        .partial_cmp(&a.avg_rating)
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(movies: &[(MovieId, &str, f32, &[&str])]) -> GraphStore {
        let mut store = GraphStore::new();
        for &(id, title, rating, genres) in movies {
            store
                .add_movie_vertex(
                    id,
                    title,
                    rating,
                    1,
                    genres.iter().map(|g| g.to_string()).collect(),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_pad_rule_pulls_in_other_genres() {
        // Two Drama matches plus one better-rated Comedy: the pad rule
        // appends the Comedy despite the genre mismatch.
        let store = store_with(&[
            (-1, "A", 8.0, &["Drama"]),
            (-2, "B", 7.0, &["Drama"]),
            (-3, "C", 9.0, &["Comedy"]),
        ]);
        let candidates: HashSet<MovieId> = [-1, -2, -3].into_iter().collect();

        let ranked = GenreFilter::new().rank_top(&store, &candidates, "Drama");

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].title, "A");
        assert_eq!(ranked[1].title, "B");
        assert_eq!(ranked[2].title, "C");
        assert_eq!(ranked[2].genres, vec!["Comedy".to_string()]);
    }

    #[test]
    fn test_genre_matches_win_over_better_rated_others() {
        let store = store_with(&[
            (-1, "Drama One", 6.0, &["Drama"]),
            (-2, "Drama Two", 5.5, &["Drama"]),
            (-3, "Drama Three", 5.0, &["Drama"]),
            (-4, "Great Comedy", 9.9, &["Comedy"]),
        ]);
        let candidates: HashSet<MovieId> = [-1, -2, -3, -4].into_iter().collect();

        let ranked = GenreFilter::new().rank_top(&store, &candidates, "Drama");

        assert_eq!(ranked.len(), 3);
        for movie in &ranked {
            assert!(movie.genres.contains(&"Drama".to_string()));
        }
    }

    #[test]
    fn test_never_more_than_three() {
        let store = store_with(&[
            (-1, "A", 8.0, &["Drama"]),
            (-2, "B", 7.0, &["Drama"]),
            (-3, "C", 9.0, &["Drama"]),
            (-4, "D", 6.0, &["Drama"]),
            (-5, "E", 5.0, &["Drama"]),
        ]);
        let candidates: HashSet<MovieId> = [-1, -2, -3, -4, -5].into_iter().collect();

        let ranked = GenreFilter::new().rank_top(&store, &candidates, "Drama");

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].title, "C");
        assert_eq!(ranked[1].title, "A");
        assert_eq!(ranked[2].title, "B");
    }

    #[test]
    fn test_small_candidate_set_returns_fewer() {
        let store = store_with(&[(-1, "Only One", 8.0, &["Drama"])]);
        let candidates: HashSet<MovieId> = [-1].into_iter().collect();

        let ranked = GenreFilter::new().rank_top(&store, &candidates, "Comedy");

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "Only One");
    }

    #[test]
    fn test_empty_candidates() {
        let store = GraphStore::new();
        let ranked = GenreFilter::new().rank_top(&store, &HashSet::new(), "Drama");
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_multi_genre_movies_match() {
        let store = store_with(&[(-1, "Crossover", 8.0, &["Action", "Drama"])]);
        let candidates: HashSet<MovieId> = [-1].into_iter().collect();

        let ranked = GenreFilter::new().rank_top(&store, &candidates, "Drama");
        assert_eq!(ranked.len(), 1);
    }
}
