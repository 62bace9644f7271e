//! Parsers for the two dataset files.
//!
//! - movie catalog CSV: `id,title,genres,vote_average,vote_count` (extra
//!   columns are ignored)
//! - rating history CSV: `userId,movieId,rating` (extra columns ignored)
//!
//! Cleaning mirrors what the recommendation model expects:
//! - catalog rows with missing or malformed fields are dropped and counted,
//!   and movies with an average below [`MIN_MOVIE_RATING`] are filtered out
//! - rating rows below [`MIN_USER_RATING`] are filtered out; malformed
//!   rating rows are an error, since that file is machine-generated
//! - movie ids are negated so they cannot collide with user ids
//!
//! The genre cell is a JSON array of `{"id", "name"}` objects. Catalog
//! exports in the wild single-quote it, so quotes are normalized before
//! parsing; cells that still fail are treated as a `|`-separated list.

use crate::error::{DataLoadError, Result};
use crate::types::{MovieRecord, RatingRecord, UserId};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Catalog movies rated below this average are dropped at load time.
pub const MIN_MOVIE_RATING: f32 = 5.0;

/// Rating events below this value are dropped at load time.
pub const MIN_USER_RATING: f32 = 3.0;

#[derive(Debug, Deserialize)]
struct MovieRow {
    id: Option<String>,
    title: Option<String>,
    genres: Option<String>,
    vote_average: Option<String>,
    vote_count: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatingRow {
    user_id: Option<String>,
    movie_id: Option<String>,
    rating: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenreEntry {
    name: String,
}

/// Parse the movie catalog file.
///
/// Returns cleaned movie records with negated ids and empty rater lists;
/// the rater lists are joined in by [`crate::load_dataset`].
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;
    parse_movies_from(file, &path.display().to_string())
}

pub(crate) fn parse_movies_from<R: Read>(input: R, file: &str) -> Result<Vec<MovieRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let mut movies = Vec::new();
    let mut dropped = 0usize;

    for row in reader.deserialize::<MovieRow>() {
        let Ok(row) = row else {
            dropped += 1;
            continue;
        };

        // The catalog export is messy; a row missing any field we need is
        // dropped rather than failing the whole load.
        let parsed = (|| {
            let raw_id: i64 = row.id?.trim().parse().ok()?;
            let title = row.title?.trim().to_string();
            if title.is_empty() {
                return None;
            }
            let avg_rating: f32 = row.vote_average?.trim().parse().ok()?;
            let vote_count: u32 = row.vote_count?.trim().parse().ok()?;
            let genres = parse_genres(row.genres.as_deref().unwrap_or(""));
            Some((raw_id, title, genres, avg_rating, vote_count))
        })();

        let Some((raw_id, title, genres, avg_rating, vote_count)) = parsed else {
            dropped += 1;
            continue;
        };

        if avg_rating < MIN_MOVIE_RATING {
            continue;
        }

        movies.push(MovieRecord {
            id: -raw_id,
            title,
            genres,
            avg_rating,
            vote_count,
            rater_ids: Vec::new(),
        });
    }

    if dropped > 0 {
        debug!("dropped {} malformed rows from {}", dropped, file);
    }
    Ok(movies)
}

/// Parse the rating history file.
pub fn parse_ratings(path: &Path) -> Result<Vec<RatingRecord>> {
    let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;
    parse_ratings_from(file, &path.display().to_string())
}

pub(crate) fn parse_ratings_from<R: Read>(input: R, file: &str) -> Result<Vec<RatingRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let mut ratings = Vec::new();

    for (idx, row) in reader.deserialize::<RatingRow>().enumerate() {
        // Header occupies line 1.
        let line = idx + 2;
        let row = row.map_err(|source| DataLoadError::CsvError {
            file: file.to_string(),
            source,
        })?;

        let user_id: UserId = parse_field(row.user_id.as_deref(), "userId", file, line)?;
        let raw_movie_id: i64 = parse_field(row.movie_id.as_deref(), "movieId", file, line)?;
        let rating: f32 = parse_field(row.rating.as_deref(), "rating", file, line)?;

        if rating < MIN_USER_RATING {
            continue;
        }

        ratings.push(RatingRecord {
            user_id,
            movie_id: -raw_movie_id,
            rating,
        });
    }

    Ok(ratings)
}

fn parse_field<T: std::str::FromStr>(
    value: Option<&str>,
    field: &str,
    file: &str,
    line: usize,
) -> Result<T> {
    let raw = value.ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Missing {}", field),
    })?;
    raw.trim().parse().map_err(|_| DataLoadError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Decode one genre cell into a list of genre names.
fn parse_genres(cell: &str) -> Vec<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.starts_with('[') {
        let normalized = trimmed.replace('\'', "\"");
        if let Ok(entries) = serde_json::from_str::<Vec<GenreEntry>>(&normalized) {
            return entries.into_iter().map(|e| e.name).collect();
        }
    }

    trimmed
        .split('|')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "[]")
        .collect()
}
