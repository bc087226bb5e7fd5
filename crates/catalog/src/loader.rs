//! Loads the movie and rating tables from JSON files in a data directory.
//!
//! Missing optional fields are filled with neutral defaults during
//! deserialization (see `cine_core::types::Movie`), matching how the
//! source tables handle sparse metadata.

use cine_core::error::{CineError, CineResult};
use cine_core::types::{Movie, Rating};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

pub struct DataLoader {
    data_dir: PathBuf,
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the movie table from `movies.json`.
    pub fn load_movies(&self) -> CineResult<Vec<Movie>> {
        let movies: Vec<Movie> = self.read_json(self.data_dir.join("movies.json"))?;
        info!(count = movies.len(), "Loaded movie table");
        Ok(movies)
    }

    /// Load the rating table from `ratings.json`, dropping rows with
    /// out-of-scale scores.
    pub fn load_ratings(&self) -> CineResult<Vec<Rating>> {
        let raw: Vec<Rating> = self.read_json(self.data_dir.join("ratings.json"))?;
        let total = raw.len();
        let ratings: Vec<Rating> = raw
            .into_iter()
            .filter(|r| r.score >= cine_core::types::RATING_SCALE_MIN && r.score <= cine_core::types::RATING_SCALE_MAX)
            .collect();
        if ratings.len() < total {
            tracing::warn!(
                dropped = total - ratings.len(),
                "Dropped ratings with out-of-scale scores"
            );
        }
        info!(count = ratings.len(), "Loaded rating table");
        Ok(ratings)
    }

    pub fn load_all(&self) -> CineResult<(Vec<Movie>, Vec<Rating>)> {
        Ok((self.load_movies()?, self.load_ratings()?))
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, path: PathBuf) -> CineResult<T> {
        let file = File::open(&path).map_err(|e| {
            CineError::DataLoad(format!("cannot open {}: {e}", path.display()))
        })?;
        let value = serde_json::from_reader(BufReader::new(file))?;
        Ok(value)
    }
}

/// Convenience for tests and examples: parse tables from JSON strings.
pub fn movies_from_json(json: &str) -> CineResult<Vec<Movie>> {
    Ok(serde_json::from_str(json)?)
}

pub fn ratings_from_json(json: &str) -> CineResult<Vec<Rating>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_data_load_error() {
        let loader = DataLoader::new("/nonexistent/cinematch-data");
        let err = loader.load_movies().unwrap_err();
        assert!(matches!(err, CineError::DataLoad(_)));
    }

    #[test]
    fn parses_tables_from_json_strings() {
        let movies = movies_from_json(
            r#"[{"movieId": 1, "title": "Sholay", "year": 1975, "genres": ["Action"], "imdb_rating": 8.2, "director": "Ramesh Sippy"}]"#,
        )
        .unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, 1);

        let ratings =
            ratings_from_json(r#"[{"userId": 1, "movieId": 1, "rating": 4.5}]"#).unwrap();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].score, 4.5);
    }
}
