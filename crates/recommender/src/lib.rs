//! # Recommender Crate
//!
//! The recommendation pipeline over the bipartite user-movie graph.
//!
//! ## Components
//!
//! ### SimilarityScorer
//! Counts, per user, how many of the 3 liked movies they also rated
//! (affinity score 0..=3). Scores live in an ephemeral per-query map.
//!
//! ### RecommendationSelector
//! Tiered union of similar users' watch histories, most-similar tier
//! first, topped up with a random catalog sample until the candidate set
//! reaches 50. Seeds are excluded throughout.
//!
//! ### GenreFilter
//! Ranks candidates by average rating within a requested genre and pads to
//! exactly 3 with the best remaining candidates when the genre runs dry.
//!
//! ### catalog / eval
//! Popularity and random-sampling helpers, and the offline accuracy
//! harness built on them.
//!
//! ## Example Usage
//!
//! ```ignore
//! use graph::GraphStore;
//! use recommender::RecommendationEngine;
//!
//! let engine = RecommendationEngine::new();
//! let liked = vec![
//!     "Heat".to_string(),
//!     "Collateral".to_string(),
//!     "The Insider".to_string(),
//! ];
//! let top3 = engine.recommend(&store, &liked, "Crime")?;
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod eval;
pub mod genre_filter;
pub mod scoring;
pub mod selection;

// Re-export commonly used types
pub use engine::RecommendationEngine;
pub use error::{RecommendError, Result};
pub use eval::{AccuracyReport, UserAccuracy, evaluate_accuracy};
pub use genre_filter::{GenreFilter, RankedMovie};
pub use scoring::{LIKED_MOVIE_COUNT, SimilarityScorer};
pub use selection::{MIN_CANDIDATES, RecommendationSelector};
