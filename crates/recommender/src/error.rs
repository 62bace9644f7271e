//! Error types for the recommendation pipeline.

use thiserror::Error;

/// Errors raised while turning liked titles into recommendations.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// The pipeline is seeded by exactly three liked titles
    #[error("Expected exactly 3 liked titles, got {found}")]
    LikedTitleCount { found: usize },

    /// A liked title does not resolve to a movie in the graph
    #[error("No movie titled {title:?} in the graph")]
    UnknownTitle { title: String },

    /// A graph operation failed underneath the pipeline
    #[error(transparent)]
    Graph(#[from] graph::GraphError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommendError>;
