//! Vertex types for the bipartite user-movie graph.
//!
//! A vertex is either a user or a movie; the two variants live in one
//! id-indexed arena, so "references" between them are plain ids resolved
//! through the store rather than owned pointers in both directions. The
//! variant is a tagged enum dispatched with exhaustive `match`.

use data_loader::{MovieId, UserId};
use std::collections::HashSet;

/// Id shared by both vertex variants. Users are positive, movies negative,
/// so the two kinds can never collide inside one map.
pub type VertexId = i64;

/// A node in the bipartite graph, either a user or a movie.
#[derive(Debug, Clone)]
pub enum Vertex {
    User(UserVertex),
    Movie(MovieVertex),
}

impl Vertex {
    pub fn id(&self) -> VertexId {
        match self {
            Vertex::User(user) => user.id,
            Vertex::Movie(movie) => movie.id,
        }
    }

    pub fn as_user(&self) -> Option<&UserVertex> {
        match self {
            Vertex::User(user) => Some(user),
            Vertex::Movie(_) => None,
        }
    }

    pub fn as_movie(&self) -> Option<&MovieVertex> {
        match self {
            Vertex::User(_) => None,
            Vertex::Movie(movie) => Some(movie),
        }
    }
}

/// A user and the ids of every movie they rated.
///
/// Note that there is no similarity score here: per-query affinity lives in
/// an ephemeral map owned by the scorer call, never on the vertex, so one
/// query cannot leak state into the next.
#[derive(Debug, Clone)]
pub struct UserVertex {
    pub id: UserId,
    /// Ids of the movies this user rated. Mirror of
    /// [`MovieVertex::linked_users`].
    pub reviewed_movies: HashSet<MovieId>,
}

impl UserVertex {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            reviewed_movies: HashSet::new(),
        }
    }
}

/// A movie, its catalog metadata, and the ids of every user who rated it.
#[derive(Debug, Clone)]
pub struct MovieVertex {
    pub id: MovieId,
    pub title: String,
    /// Genre names in catalog order.
    pub genres: Vec<String>,
    /// Running mean rating; always equals total score / `num_raters`.
    pub avg_rating: f32,
    /// Number of ratings behind `avg_rating`, at least 1.
    pub num_raters: u32,
    /// Ids of the users who rated this movie. Mirror of
    /// [`UserVertex::reviewed_movies`].
    pub linked_users: HashSet<UserId>,
}

impl MovieVertex {
    pub fn new(
        id: MovieId,
        title: impl Into<String>,
        avg_rating: f32,
        num_raters: u32,
        genres: Vec<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            genres,
            avg_rating,
            num_raters,
            linked_users: HashSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id_dispatch() {
        let user = Vertex::User(UserVertex::new(7));
        let movie = Vertex::Movie(MovieVertex::new(-3, "Heat", 7.9, 120, Vec::new()));

        assert_eq!(user.id(), 7);
        assert_eq!(movie.id(), -3);
        assert!(user.as_user().is_some());
        assert!(user.as_movie().is_none());
        assert!(movie.as_movie().is_some());
    }
}
