//! Catalog-level helpers: popularity ranking and random sampling.
//!
//! Both are plain queries over the movie vertices; the selector uses the
//! random sample as its last-resort candidate source, and the evaluation
//! harness seeds itself from the popularity list.

use data_loader::MovieId;
use graph::GraphStore;
use rand::seq::IteratorRandom;
use std::cmp::Ordering;
use std::collections::HashSet;

/// How many titles the popularity list carries by default.
pub const POPULAR_MOVIE_COUNT: usize = 50;

/// A movie needs at least this many raters to count as popular.
pub const MIN_RATERS_FOR_POPULARITY: u32 = 30;

/// Titles of the top `limit` movies by average rating, considering only
/// movies with at least [`MIN_RATERS_FOR_POPULARITY`] raters.
pub fn popular_movies(store: &GraphStore, limit: usize) -> Vec<String> {
    let mut eligible: Vec<(String, f32)> = store
        .movies()
        .filter(|movie| movie.num_raters >= MIN_RATERS_FOR_POPULARITY)
        .map(|movie| (movie.title.clone(), movie.avg_rating))
        .collect();

    // Rating descending, title ascending on ties so the list is stable
    // across runs.
    eligible.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    eligible.truncate(limit);
    eligible.into_iter().map(|(title, _)| title).collect()
}

/// Draw up to `count` distinct movie ids uniformly, skipping `exclude`.
///
/// Returns fewer than `count` ids when the catalog minus the exclusions is
/// smaller than the request; it never errors.
pub fn random_sample(
    store: &GraphStore,
    count: usize,
    exclude: &HashSet<MovieId>,
) -> HashSet<MovieId> {
    let mut rng = rand::rng();
    store
        .movies()
        .map(|movie| movie.id)
        .filter(|id| !exclude.contains(id))
        .choose_multiple(&mut rng, count)
        .into_iter()
        .collect()
}
