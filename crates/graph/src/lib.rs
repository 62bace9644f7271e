//! # Graph Crate
//!
//! The in-memory bipartite graph at the heart of the recommender: users on
//! one side, movies on the other, an edge wherever a user rated a movie.
//!
//! ## Main Components
//!
//! - **vertex**: the `Vertex` enum and its `User`/`Movie` payloads
//! - **store**: `GraphStore`, the id-indexed vertex arena and its
//!   incrementally-maintained indices
//! - **review**: online review ingestion with running-mean updates
//! - **error**: error types for graph construction and mutation
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::load_dataset;
//! use graph::GraphStore;
//! use std::path::Path;
//!
//! let dataset = load_dataset(
//!     Path::new("data/movies_metadata.csv"),
//!     Path::new("data/ratings_small.csv"),
//! )?;
//!
//! let mut store = GraphStore::new();
//! store.add_movies_users(&dataset.movies)?;
//! store.validate()?;
//!
//! store.submit_review("Heat", 9.0)?;
//! println!("Heat now averages {:?}", store.avg_rating("Heat"));
//! ```
//!
//! The store assumes one caller at a time; every operation runs to
//! completion before the next is issued, and nothing here locks.

pub mod error;
pub mod review;
pub mod store;
pub mod vertex;

// Re-export commonly used types for convenience
pub use error::{GraphError, Result};
pub use review::ReviewReceipt;
pub use store::GraphStore;
pub use vertex::{MovieVertex, UserVertex, Vertex, VertexId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = GraphStore::new();
        assert_eq!(store.counts(), (0, 0, 0));
        assert!(store.movie_id_by_title("anything").is_none());
        assert!(store.avg_rating("anything").is_none());
        store.validate().unwrap();
    }

    #[test]
    fn test_manual_construction() {
        let mut store = GraphStore::new();
        store.add_user_vertex(1).unwrap();
        store
            .add_movie_vertex(-1, "Alien", 8.1, 900, vec!["Horror".to_string()])
            .unwrap();
        store.add_edge(1, -1).unwrap();

        assert_eq!(store.counts(), (1, 1, 1));
        assert_eq!(store.movie_id_by_title("Alien"), Some(-1));
        store.validate().unwrap();
    }
}
