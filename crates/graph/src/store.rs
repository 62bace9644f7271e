//! The vertex arena and edge maintenance.
//!
//! `GraphStore` owns every vertex, keyed by its id, and keeps two derived
//! indices current as the graph mutates:
//!
//! - the reverse adjacency sets on the vertices themselves (user -> rated
//!   movie ids, movie -> rater ids), updated by every `add_edge`
//! - a title -> movie id map, updated by every `add_movie_vertex`
//!
//! Queries read these indices directly; nothing is rebuilt per call.
//! All operations are synchronous and assume a single caller: in
//! particular, id allocation for reviews reads a max-id watermark, so
//! concurrent mutation must be serialized by the caller.

use crate::error::{GraphError, Result};
use crate::vertex::{MovieVertex, UserVertex, Vertex, VertexId};
use data_loader::{MovieId, MovieRecord, UserId};
use std::collections::{BTreeSet, HashMap};
use tracing::info;

/// In-memory bipartite graph of users and movies.
#[derive(Debug, Default)]
pub struct GraphStore {
    /// All vertices, both variants, in one id-indexed arena.
    vertices: HashMap<VertexId, Vertex>,
    /// Movie lookup by exact title.
    title_index: HashMap<String, MovieId>,
    /// Highest user id ever inserted; the next synthetic reviewer gets
    /// `max_user_id + 1`.
    pub(crate) max_user_id: UserId,
    /// Highest raw (pre-negation) catalog movie id ever inserted; the next
    /// review-created movie gets `-(max_raw_movie_id + 1)`.
    pub(crate) max_raw_movie_id: i64,
}

impl GraphStore {
    /// Creates an empty graph with no vertices or edges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user vertex with no edges.
    ///
    /// The caller must guarantee the id is fresh; bulk load and review
    /// ingestion go through [`GraphStore::ensure_user_vertex`] instead.
    pub fn add_user_vertex(&mut self, id: UserId) -> Result<()> {
        if self.vertices.contains_key(&id) {
            return Err(GraphError::DuplicateVertex { id });
        }
        self.vertices.insert(id, Vertex::User(UserVertex::new(id)));
        self.max_user_id = self.max_user_id.max(id);
        Ok(())
    }

    /// Insert a user vertex unless one with this id already exists.
    pub fn ensure_user_vertex(&mut self, id: UserId) -> Result<()> {
        match self.vertices.get(&id) {
            Some(Vertex::User(_)) => Ok(()),
            Some(Vertex::Movie(_)) => Err(GraphError::KindMismatch {
                id,
                expected: "user",
            }),
            None => self.add_user_vertex(id),
        }
    }

    /// Insert a movie vertex with no edges and index its title.
    pub fn add_movie_vertex(
        &mut self,
        id: MovieId,
        title: &str,
        avg_rating: f32,
        num_raters: u32,
        genres: Vec<String>,
    ) -> Result<()> {
        if self.vertices.contains_key(&id) {
            return Err(GraphError::DuplicateVertex { id });
        }
        self.vertices.insert(
            id,
            Vertex::Movie(MovieVertex::new(id, title, avg_rating, num_raters, genres)),
        );
        self.title_index.insert(title.to_string(), id);
        self.max_raw_movie_id = self.max_raw_movie_id.max(-id);
        Ok(())
    }

    /// Record that `user_id` rated `movie_id`, symmetrically on both
    /// endpoints. Adding the same edge twice is a no-op.
    pub fn add_edge(&mut self, user_id: UserId, movie_id: MovieId) -> Result<()> {
        if user_id == movie_id {
            return Err(GraphError::SelfEdge { id: user_id });
        }
        match self.vertices.get(&user_id) {
            Some(Vertex::User(_)) => {}
            Some(Vertex::Movie(_)) => {
                return Err(GraphError::KindMismatch {
                    id: user_id,
                    expected: "user",
                });
            }
            None => return Err(GraphError::VertexNotFound { id: user_id }),
        }
        match self.vertices.get(&movie_id) {
            Some(Vertex::Movie(_)) => {}
            Some(Vertex::User(_)) => {
                return Err(GraphError::KindMismatch {
                    id: movie_id,
                    expected: "movie",
                });
            }
            None => return Err(GraphError::VertexNotFound { id: movie_id }),
        }

        // Both endpoints checked above; record the edge on each side.
        if let Some(Vertex::User(user)) = self.vertices.get_mut(&user_id) {
            user.reviewed_movies.insert(movie_id);
        }
        if let Some(Vertex::Movie(movie)) = self.vertices.get_mut(&movie_id) {
            movie.linked_users.insert(user_id);
        }
        Ok(())
    }

    /// Bulk entry point: build the full vertex and edge set from loaded
    /// movie records.
    ///
    /// For every movie record, creates the movie vertex, then lazily
    /// creates each rater's user vertex and adds the edge. Records whose
    /// rater list is empty are skipped; an unreviewed movie can never be
    /// reached by a similarity query.
    pub fn add_movies_users(&mut self, movies: &[MovieRecord]) -> Result<()> {
        for record in movies {
            if record.rater_ids.is_empty() {
                continue;
            }
            self.add_movie_vertex(
                record.id,
                &record.title,
                record.avg_rating,
                record.vote_count,
                record.genres.clone(),
            )?;
            for &user_id in &record.rater_ids {
                self.ensure_user_vertex(user_id)?;
                self.add_edge(user_id, record.id)?;
            }
        }

        let (users, movies, edges) = self.counts();
        info!("graph built: {} users, {} movies, {} edges", users, movies, edges);
        Ok(())
    }

    /// Get a movie vertex by id.
    pub fn movie(&self, id: MovieId) -> Option<&MovieVertex> {
        self.vertices.get(&id).and_then(Vertex::as_movie)
    }

    /// Get a user vertex by id.
    pub fn user(&self, id: UserId) -> Option<&UserVertex> {
        self.vertices.get(&id).and_then(Vertex::as_user)
    }

    /// Resolve a title to its movie id.
    pub fn movie_id_by_title(&self, title: &str) -> Option<MovieId> {
        self.title_index.get(title).copied()
    }

    /// Iterate over all user vertices, in arbitrary order.
    pub fn users(&self) -> impl Iterator<Item = &UserVertex> {
        self.vertices.values().filter_map(Vertex::as_user)
    }

    /// Iterate over all movie vertices, in arbitrary order.
    pub fn movies(&self) -> impl Iterator<Item = &MovieVertex> {
        self.vertices.values().filter_map(Vertex::as_movie)
    }

    /// Average rating for a movie by title, rounded to two decimals.
    ///
    /// Returns `None` for a title the graph has never seen; callers branch
    /// on presence rather than handling an error.
    pub fn avg_rating(&self, title: &str) -> Option<f32> {
        let id = self.movie_id_by_title(title)?;
        let movie = self.movie(id)?;
        Some((movie.avg_rating * 100.0).round() / 100.0)
    }

    /// Every genre name present in the catalog, sorted.
    pub fn genres(&self) -> BTreeSet<String> {
        self.movies()
            .flat_map(|movie| movie.genres.iter().cloned())
            .collect()
    }

    /// Get counts for debugging/validation: (users, movies, edges).
    pub fn counts(&self) -> (usize, usize, usize) {
        let users = self.users().count();
        let movies = self.movies().count();
        let edges = self.users().map(|u| u.reviewed_movies.len()).sum();
        (users, movies, edges)
    }

    /// Check the structural invariants of the graph.
    ///
    /// - users keep positive ids, movies negative ids
    /// - every adjacency entry resolves to a vertex of the right kind
    /// - every edge is recorded on both endpoints
    pub fn validate(&self) -> Result<()> {
        for vertex in self.vertices.values() {
            match vertex {
                Vertex::User(user) => {
                    if user.id <= 0 {
                        return Err(GraphError::IdSpace {
                            id: user.id,
                            expected: "user",
                        });
                    }
                    for &movie_id in &user.reviewed_movies {
                        let movie = self
                            .movie(movie_id)
                            .ok_or(GraphError::VertexNotFound { id: movie_id })?;
                        if !movie.linked_users.contains(&user.id) {
                            return Err(GraphError::AsymmetricEdge {
                                user_id: user.id,
                                movie_id,
                            });
                        }
                    }
                }
                Vertex::Movie(movie) => {
                    if movie.id >= 0 {
                        return Err(GraphError::IdSpace {
                            id: movie.id,
                            expected: "movie",
                        });
                    }
                    for &user_id in &movie.linked_users {
                        let user = self
                            .user(user_id)
                            .ok_or(GraphError::VertexNotFound { id: user_id })?;
                        if !user.reviewed_movies.contains(&movie.id) {
                            return Err(GraphError::AsymmetricEdge {
                                user_id,
                                movie_id: movie.id,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn movie_mut(&mut self, id: MovieId) -> Option<&mut MovieVertex> {
        match self.vertices.get_mut(&id) {
            Some(Vertex::Movie(movie)) => Some(movie),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: MovieId, title: &str, raters: &[UserId]) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            genres: vec!["Drama".to_string()],
            avg_rating: 7.5,
            vote_count: raters.len() as u32,
            rater_ids: raters.to_vec(),
        }
    }

    fn create_test_store() -> GraphStore {
        let mut store = GraphStore::new();
        let records = vec![
            record(-1, "Movie One", &[10, 11]),
            record(-2, "Movie Two", &[11]),
            record(-3, "Unrated Movie", &[]),
        ];
        store.add_movies_users(&records).unwrap();
        store
    }

    #[test]
    fn test_add_movies_users_builds_graph() {
        let store = create_test_store();
        let (users, movies, edges) = store.counts();

        // The rater-less movie never enters the graph.
        assert_eq!(users, 2);
        assert_eq!(movies, 2);
        assert_eq!(edges, 3);
        assert!(store.movie_id_by_title("Unrated Movie").is_none());
    }

    #[test]
    fn test_edge_symmetry_after_bulk_load() {
        let store = create_test_store();
        store.validate().unwrap();

        let user = store.user(11).unwrap();
        assert!(user.reviewed_movies.contains(&-1));
        assert!(user.reviewed_movies.contains(&-2));
        assert!(store.movie(-1).unwrap().linked_users.contains(&11));
        assert!(store.movie(-2).unwrap().linked_users.contains(&11));
    }

    #[test]
    fn test_duplicate_vertex_rejected() {
        let mut store = create_test_store();
        assert!(matches!(
            store.add_user_vertex(10),
            Err(GraphError::DuplicateVertex { id: 10 })
        ));
        assert!(matches!(
            store.add_movie_vertex(-1, "Movie One", 7.5, 2, Vec::new()),
            Err(GraphError::DuplicateVertex { id: -1 })
        ));
    }

    #[test]
    fn test_add_edge_missing_endpoint() {
        let mut store = create_test_store();
        assert!(matches!(
            store.add_edge(99, -1),
            Err(GraphError::VertexNotFound { id: 99 })
        ));
        assert!(matches!(
            store.add_edge(10, -99),
            Err(GraphError::VertexNotFound { id: -99 })
        ));
    }

    #[test]
    fn test_add_edge_same_id_rejected() {
        // Id spaces are disjoint by construction, so a shared id can only
        // occur through misuse; the precondition is still enforced.
        let mut store = create_test_store();
        assert!(matches!(
            store.add_edge(5, 5),
            Err(GraphError::SelfEdge { id: 5 })
        ));
    }

    #[test]
    fn test_add_edge_kind_mismatch() {
        let mut store = create_test_store();
        assert!(matches!(
            store.add_edge(-1, -2),
            Err(GraphError::KindMismatch { expected: "user", .. })
        ));
        assert!(matches!(
            store.add_edge(10, 11),
            Err(GraphError::KindMismatch { expected: "movie", .. })
        ));
    }

    #[test]
    fn test_avg_rating_lookup() {
        let store = create_test_store();
        assert_eq!(store.avg_rating("Movie One"), Some(7.5));
        assert!(store.avg_rating("Nope").is_none());
    }

    #[test]
    fn test_avg_rating_rounds_to_two_decimals() {
        let mut store = GraphStore::new();
        store
            .add_movie_vertex(-1, "Thirds", 20.0 / 3.0, 3, Vec::new())
            .unwrap();
        assert_eq!(store.avg_rating("Thirds"), Some(6.67));
    }

    #[test]
    fn test_genres_sorted_union() {
        let mut store = GraphStore::new();
        store
            .add_movie_vertex(
                -1,
                "A",
                7.0,
                1,
                vec!["Drama".to_string(), "Crime".to_string()],
            )
            .unwrap();
        store
            .add_movie_vertex(-2, "B", 6.0, 1, vec!["Drama".to_string()])
            .unwrap();

        let genres: Vec<String> = store.genres().into_iter().collect();
        assert_eq!(genres, vec!["Crime".to_string(), "Drama".to_string()]);
    }

    #[test]
    fn test_validate_detects_asymmetry() {
        let mut store = create_test_store();
        // Corrupt one side of an edge directly.
        if let Some(Vertex::Movie(movie)) = store.vertices.get_mut(&-1) {
            movie.linked_users.remove(&10);
        }
        assert!(matches!(
            store.validate(),
            Err(GraphError::AsymmetricEdge {
                user_id: 10,
                movie_id: -1
            })
        ));
    }

    #[test]
    fn test_validate_detects_id_space_violation() {
        let mut store = GraphStore::new();
        store
            .vertices
            .insert(5, Vertex::Movie(MovieVertex::new(5, "Bad", 6.0, 1, Vec::new())));
        assert!(matches!(
            store.validate(),
            Err(GraphError::IdSpace { id: 5, expected: "movie" })
        ));
    }

    #[test]
    fn test_duplicate_ratings_collapse_to_one_edge() {
        let mut store = GraphStore::new();
        let records = vec![record(-1, "Movie One", &[10, 10, 10])];
        store.add_movies_users(&records).unwrap();

        let (users, movies, edges) = store.counts();
        assert_eq!((users, movies, edges), (1, 1, 1));
    }
}
