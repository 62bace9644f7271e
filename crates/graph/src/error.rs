//! Error types for graph construction and mutation.

use crate::vertex::VertexId;
use thiserror::Error;

/// Errors raised by [`crate::GraphStore`] operations.
///
/// Every failure here is a synchronous contract violation by the caller or
/// a corrupted graph; nothing is retryable.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A vertex with this id already exists
    #[error("Vertex {id} already exists")]
    DuplicateVertex { id: VertexId },

    /// An edge endpoint is not in the graph
    #[error("Vertex {id} not found")]
    VertexNotFound { id: VertexId },

    /// An id resolved to the wrong vertex variant
    #[error("Vertex {id} is not a {expected} vertex")]
    KindMismatch {
        id: VertexId,
        expected: &'static str,
    },

    /// A user and a movie may never share an id
    #[error("Cannot add an edge from vertex {id} to itself")]
    SelfEdge { id: VertexId },

    /// Title lookup failed where a movie was required
    #[error("No movie titled {title:?} in the graph")]
    UnknownTitle { title: String },

    /// A review rating fell outside the 0.0..=10.0 scale
    #[error("Rating {value} is outside the 0.0..=10.0 scale")]
    InvalidRating { value: f32 },

    /// Edge recorded on one endpoint but not the other
    #[error("Edge between user {user_id} and movie {movie_id} is not symmetric")]
    AsymmetricEdge { user_id: VertexId, movie_id: VertexId },

    /// An id landed in the wrong half of the shared id space
    #[error("Id {id} is outside the {expected} id space")]
    IdSpace {
        id: VertexId,
        expected: &'static str,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, GraphError>;
