//! # Data Loader Crate
//!
//! Loads and cleans the two tabular dataset files behind the recommender:
//! the movie catalog CSV and the rating history CSV.
//!
//! ## Main Components
//!
//! - **types**: record shapes handed to the graph layer
//!   (MovieRecord, RatingRecord, Dataset)
//! - **parser**: CSV parsing and cleaning for both files
//! - **error**: error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::load_dataset;
//! use std::path::Path;
//!
//! let dataset = load_dataset(
//!     Path::new("data/movies_metadata.csv"),
//!     Path::new("data/ratings_small.csv"),
//! )?;
//!
//! let (movies, ratings) = dataset.counts();
//! println!("Loaded {} rated movies from {} rating events", movies, ratings);
//! ```

pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::{MIN_MOVIE_RATING, MIN_USER_RATING, parse_movies, parse_ratings};
pub use types::{Dataset, MovieId, MovieRecord, RatingRecord, UserId};

use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Load both dataset files and join them into a [`Dataset`].
///
/// The two files are parsed in parallel; each movie record then gets the
/// ids of the users who rated it, and movies nobody rated are dropped —
/// they can never be reached by a similarity query.
pub fn load_dataset(movie_path: &Path, rating_path: &Path) -> Result<Dataset> {
    let (movies, ratings) = rayon::join(
        || parser::parse_movies(movie_path),
        || parser::parse_ratings(rating_path),
    );
    let movies = movies?;
    let ratings = ratings?;

    let dataset = join_raters(movies, ratings);
    let (movie_count, rating_count) = dataset.counts();
    info!(
        "loaded {} rated movies from {} rating events",
        movie_count, rating_count
    );
    Ok(dataset)
}

/// Attach each movie's rater ids and drop movies with no ratings.
fn join_raters(movies: Vec<MovieRecord>, ratings: Vec<RatingRecord>) -> Dataset {
    let mut raters_by_movie: HashMap<MovieId, Vec<UserId>> = HashMap::new();
    for rating in &ratings {
        raters_by_movie
            .entry(rating.movie_id)
            .or_default()
            .push(rating.user_id);
    }

    let movies = movies
        .into_iter()
        .filter_map(|mut movie| {
            let raters = raters_by_movie.remove(&movie.id)?;
            movie.rater_ids = raters;
            Some(movie)
        })
        .collect();

    Dataset { movies, ratings }
}
