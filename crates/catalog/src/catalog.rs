//! Movie catalog — stores the loaded movie table and answers the thin
//! filter/sort queries that need no vectorization.

use cine_core::types::{Movie, MovieId, RatedHit, Rating, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Dataset-level statistics, for the `stats` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    pub num_movies: usize,
    pub num_genres: usize,
    pub num_directors: usize,
    pub avg_rating: f64,
    pub year_min: i32,
    pub year_max: i32,
    pub num_ratings: usize,
    pub num_users: usize,
    pub num_movies_rated: usize,
    pub avg_user_rating: f64,
}

/// Immutable after construction; all queries are read-only.
pub struct MovieCatalog {
    movies: Vec<Movie>,
    index: HashMap<MovieId, usize>,
}

impl MovieCatalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        let index = movies
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id, i))
            .collect();
        Self { movies, index }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, movie_id: MovieId) -> Option<&Movie> {
        self.index.get(&movie_id).map(|&i| &self.movies[i])
    }

    /// Case-insensitive substring search over titles, best-rated first.
    pub fn search_title(&self, query: &str) -> Vec<&Movie> {
        let needle = query.to_lowercase();
        let mut matches: Vec<&Movie> = self
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .collect();
        sort_by_rating_desc(&mut matches);
        matches
    }

    pub fn by_genre(&self, genre: &str) -> Vec<&Movie> {
        let needle = genre.to_lowercase();
        let mut matches: Vec<&Movie> = self
            .movies
            .iter()
            .filter(|m| m.genres.iter().any(|g| g.to_lowercase().contains(&needle)))
            .collect();
        sort_by_rating_desc(&mut matches);
        matches
    }

    pub fn by_year(&self, year: i32) -> Vec<&Movie> {
        let mut matches: Vec<&Movie> = self.movies.iter().filter(|m| m.year == year).collect();
        sort_by_rating_desc(&mut matches);
        matches
    }

    /// Case-insensitive substring match on the director field.
    pub fn by_director(&self, pattern: &str) -> Vec<&Movie> {
        let needle = pattern.to_lowercase();
        let mut matches: Vec<&Movie> = self
            .movies
            .iter()
            .filter(|m| m.director.to_lowercase().contains(&needle))
            .collect();
        sort_by_rating_desc(&mut matches);
        matches
    }

    pub fn top_rated(&self, n: usize, min_rating: f64) -> Vec<&Movie> {
        let mut matches: Vec<&Movie> = self
            .movies
            .iter()
            .filter(|m| m.rating >= min_rating)
            .collect();
        sort_by_rating_desc(&mut matches);
        matches.truncate(n);
        matches
    }

    /// A user's rating history joined with movie metadata, highest score
    /// first. Ratings for movies missing from the catalog are skipped.
    pub fn ratings_for_user(&self, ratings: &[Rating], user_id: UserId) -> Vec<RatedHit> {
        let mut hits: Vec<RatedHit> = ratings
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| {
                self.get(r.movie_id).map(|m| RatedHit {
                    movie_id: m.id,
                    title: m.title.clone(),
                    rating: r.score,
                    genres: m.genres.clone(),
                    year: m.year,
                })
            })
            .collect();
        hits.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }

    pub fn statistics(&self, ratings: &[Rating]) -> CatalogStats {
        let mut genres = HashSet::new();
        let mut directors = HashSet::new();
        let mut year_min = i32::MAX;
        let mut year_max = i32::MIN;
        let mut rating_sum = 0.0;
        for movie in &self.movies {
            for genre in &movie.genres {
                genres.insert(genre.as_str());
            }
            directors.insert(movie.director.as_str());
            year_min = year_min.min(movie.year);
            year_max = year_max.max(movie.year);
            rating_sum += movie.rating;
        }
        if self.movies.is_empty() {
            year_min = 0;
            year_max = 0;
        }

        let users: HashSet<_> = ratings.iter().map(|r| r.user_id).collect();
        let rated_movies: HashSet<_> = ratings.iter().map(|r| r.movie_id).collect();
        let user_rating_sum: f64 = ratings.iter().map(|r| r.score).sum();

        CatalogStats {
            num_movies: self.movies.len(),
            num_genres: genres.len(),
            num_directors: directors.len(),
            avg_rating: if self.movies.is_empty() {
                0.0
            } else {
                rating_sum / self.movies.len() as f64
            },
            year_min,
            year_max,
            num_ratings: ratings.len(),
            num_users: users.len(),
            num_movies_rated: rated_movies.len(),
            avg_user_rating: if ratings.is_empty() {
                0.0
            } else {
                user_rating_sum / ratings.len() as f64
            },
        }
    }
}

fn sort_by_rating_desc(movies: &mut [&Movie]) {
    movies.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, title: &str, year: i32, genres: &[&str], rating: f64, director: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            year,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            rating,
            director: director.to_string(),
            cast: Vec::new(),
            description: String::new(),
            poster: String::new(),
            language: String::new(),
        }
    }

    fn sample_catalog() -> MovieCatalog {
        MovieCatalog::new(vec![
            movie(1, "Sholay", 1975, &["Action", "Adventure"], 8.2, "Ramesh Sippy"),
            movie(2, "Lagaan", 2001, &["Drama", "Sport"], 8.1, "Ashutosh Gowariker"),
            movie(3, "Dil Chahta Hai", 2001, &["Comedy", "Drama"], 8.1, "Farhan Akhtar"),
            movie(4, "Seeta Aur Geeta", 1972, &["Comedy"], 7.4, "Ramesh Sippy"),
        ])
    }

    #[test]
    fn get_by_id_and_unknown_id() {
        let catalog = sample_catalog();
        assert_eq!(catalog.get(2).unwrap().title, "Lagaan");
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn search_title_is_case_insensitive_partial() {
        let catalog = sample_catalog();
        let hits = catalog.search_title("dil");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
    }

    #[test]
    fn by_director_matches_substring_sorted_by_rating() {
        let catalog = sample_catalog();
        let hits = catalog.by_director("sippy");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 1);
        assert!(hits[0].rating >= hits[1].rating);
    }

    #[test]
    fn by_genre_matches_any_tag() {
        let catalog = sample_catalog();
        let hits = catalog.by_genre("comedy");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 3);
    }

    #[test]
    fn by_year_returns_only_that_year() {
        let catalog = sample_catalog();
        let hits = catalog.by_year(2001);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|m| m.year == 2001));
        assert!(catalog.by_year(1950).is_empty());
    }

    #[test]
    fn top_rated_respects_threshold_and_limit() {
        let catalog = sample_catalog();
        let hits = catalog.top_rated(2, 8.0);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|m| m.rating >= 8.0));
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn ratings_for_user_joins_titles_sorted_by_score() {
        let catalog = sample_catalog();
        let ratings = vec![
            Rating { user_id: 1, movie_id: 2, score: 3.5 },
            Rating { user_id: 1, movie_id: 1, score: 5.0 },
            Rating { user_id: 2, movie_id: 1, score: 2.0 },
            // Movie 99 is not in the catalog, so this row is dropped.
            Rating { user_id: 1, movie_id: 99, score: 4.0 },
        ];
        let hits = catalog.ratings_for_user(&ratings, 1);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Sholay");
        assert_eq!(hits[0].rating, 5.0);
        assert_eq!(hits[1].movie_id, 2);
        assert!(catalog.ratings_for_user(&ratings, 9).is_empty());
    }

    #[test]
    fn statistics_cover_movies_and_ratings() {
        let catalog = sample_catalog();
        let ratings = vec![
            Rating { user_id: 1, movie_id: 1, score: 5.0 },
            Rating { user_id: 1, movie_id: 2, score: 4.0 },
            Rating { user_id: 2, movie_id: 1, score: 3.0 },
        ];
        let stats = catalog.statistics(&ratings);
        assert_eq!(stats.num_movies, 4);
        assert_eq!(stats.num_directors, 3);
        assert_eq!(stats.num_users, 2);
        assert_eq!(stats.num_movies_rated, 2);
        assert_eq!(stats.year_min, 1972);
        assert_eq!(stats.year_max, 2001);
        assert!((stats.avg_user_rating - 4.0).abs() < 1e-9);
    }
}
