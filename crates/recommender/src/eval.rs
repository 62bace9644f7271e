//! Offline accuracy evaluation.
//!
//! Measures how much of a held-out user's real watch history the pipeline
//! recovers when seeded with three of that user's watches.
//!
//! ## Algorithm
//! 1. Build the popularity list (top 50 titles by rating, >= 30 raters)
//! 2. From the held-out ratings, keep users who watched more than 3 of
//!    those popular movies
//! 3. Seed the engine with each such user's first 3 popular watches
//! 4. Score = |recommended ∩ held-out watches| / (|held-out watches| - 3),
//!    the 3 seeds being excluded from the denominator

use crate::catalog::{self, POPULAR_MOVIE_COUNT};
use crate::engine::RecommendationEngine;
use crate::error::Result;
use data_loader::{MovieId, RatingRecord, UserId};
use graph::GraphStore;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, info};

/// Seeds are drawn from watches of popular movies; a user needs more than
/// this many to be evaluated.
const MIN_POPULAR_WATCHES: usize = 3;

/// Accuracy of one evaluated user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccuracy {
    pub user_id: UserId,
    /// Fraction of the user's non-seed watches that were recommended,
    /// rounded to three decimals.
    pub percent_matched: f32,
}

/// Accuracy across every evaluated user.
#[derive(Debug, Clone, Default)]
pub struct AccuracyReport {
    pub per_user: Vec<UserAccuracy>,
    pub mean_matched: f32,
}

/// Evaluate the pipeline against a held-out rating file.
pub fn evaluate_accuracy(
    store: &GraphStore,
    engine: &RecommendationEngine,
    holdout: &[RatingRecord],
) -> Result<AccuracyReport> {
    let popular_ids: HashSet<MovieId> = catalog::popular_movies(store, POPULAR_MOVIE_COUNT)
        .iter()
        .filter_map(|title| store.movie_id_by_title(title))
        .collect();

    // BTree keeps user order and per-user watch order deterministic.
    let mut watched: BTreeMap<UserId, BTreeSet<MovieId>> = BTreeMap::new();
    for rating in holdout {
        if store.movie(rating.movie_id).is_some() {
            watched.entry(rating.user_id).or_default().insert(rating.movie_id);
        }
    }

    let mut per_user = Vec::new();
    for (user_id, movies) in &watched {
        let popular_watches: Vec<MovieId> = movies
            .iter()
            .copied()
            .filter(|id| popular_ids.contains(id))
            .collect();
        if popular_watches.len() <= MIN_POPULAR_WATCHES {
            continue;
        }

        let seeds: Vec<String> = popular_watches
            .iter()
            .take(MIN_POPULAR_WATCHES)
            .filter_map(|&id| store.movie(id).map(|movie| movie.title.clone()))
            .collect();

        let recommended = engine.return_movies(store, &seeds)?;
        let matched = movies.iter().filter(|id| recommended.contains(*id)).count();
        let denominator = movies.len() - MIN_POPULAR_WATCHES;
        let percent = round3(matched as f32 / denominator as f32);

        debug!(
            "user {}: {}/{} held-out watches recommended",
            user_id, matched, denominator
        );
        per_user.push(UserAccuracy {
            user_id: *user_id,
            percent_matched: percent,
        });
    }

    let mean_matched = if per_user.is_empty() {
        0.0
    } else {
        round3(per_user.iter().map(|u| u.percent_matched).sum::<f32>() / per_user.len() as f32)
    };
    info!(
        "evaluated {} users, mean matched {:.3}",
        per_user.len(),
        mean_matched
    );

    Ok(AccuracyReport {
        per_user,
        mean_matched,
    })
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}
