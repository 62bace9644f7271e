//! The full recommendation pipeline behind one facade.
//!
//! Callers hand the engine three liked titles and a genre; the engine
//! resolves the titles, scores users, selects candidates, and ranks the
//! top 3 within the genre. Each stage is also exposed on its own so the
//! presentation layer and the evaluation harness can stop midway.

use crate::error::{RecommendError, Result};
use crate::genre_filter::{GenreFilter, RankedMovie};
use crate::scoring::{LIKED_MOVIE_COUNT, SimilarityScorer};
use crate::selection::RecommendationSelector;
use data_loader::MovieId;
use graph::GraphStore;
use std::collections::HashSet;
use tracing::{info, instrument};

/// Scorer, selector, and genre filter wired together.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine {
    scorer: SimilarityScorer,
    selector: RecommendationSelector,
    genre_filter: GenreFilter,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self {
            scorer: SimilarityScorer::new(),
            selector: RecommendationSelector::new(),
            genre_filter: GenreFilter::new(),
        }
    }

    /// Swap in a differently-configured selector.
    pub fn with_selector(mut self, selector: RecommendationSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Swap in a differently-configured genre filter.
    pub fn with_genre_filter(mut self, genre_filter: GenreFilter) -> Self {
        self.genre_filter = genre_filter;
        self
    }

    /// Run scoring and selection: liked titles in, candidate movie ids out.
    ///
    /// Fails fast on anything other than exactly 3 resolvable titles.
    #[instrument(skip(self, store))]
    pub fn return_movies(
        &self,
        store: &GraphStore,
        liked_titles: &[String],
    ) -> Result<HashSet<MovieId>> {
        let liked = self.resolve_titles(store, liked_titles)?;
        let scores = self.scorer.score_users(store, &liked);
        let candidates = self.selector.select(store, &scores, &liked);
        info!("{} candidate movies for {:?}", candidates.len(), liked_titles);
        Ok(candidates)
    }

    /// Rank an already-selected candidate set within a genre.
    pub fn apply_filters(
        &self,
        store: &GraphStore,
        candidates: &HashSet<MovieId>,
        genre: &str,
    ) -> Vec<RankedMovie> {
        self.genre_filter.rank_top(store, candidates, genre)
    }

    /// The whole pipeline: three liked titles and a genre in, at most three
    /// ranked movies out.
    pub fn recommend(
        &self,
        store: &GraphStore,
        liked_titles: &[String],
        genre: &str,
    ) -> Result<Vec<RankedMovie>> {
        let candidates = self.return_movies(store, liked_titles)?;
        Ok(self.apply_filters(store, &candidates, genre))
    }

    fn resolve_titles(
        &self,
        store: &GraphStore,
        liked_titles: &[String],
    ) -> Result<[MovieId; LIKED_MOVIE_COUNT]> {
        if liked_titles.len() != LIKED_MOVIE_COUNT {
            return Err(RecommendError::LikedTitleCount {
                found: liked_titles.len(),
            });
        }

        let mut liked = [0 as MovieId; LIKED_MOVIE_COUNT];
        for (slot, title) in liked.iter_mut().zip(liked_titles) {
            *slot = store
                .movie_id_by_title(title)
                .ok_or_else(|| RecommendError::UnknownTitle {
                    title: title.clone(),
                })?;
        }
        Ok(liked)
    }
}
