//! Content Similarity Engine — answers "movies like X" and genre-text
//! queries from an eagerly built all-pairs similarity matrix, plus the
//! pure filter/sort rating and director queries.

use crate::features;
use crate::similarity;
use crate::tfidf::TfidfVectorizer;
use cine_core::config::ContentConfig;
use cine_core::error::{CineError, CineResult};
use cine_core::types::{Movie, MovieId, RatedHit, SimilarityHit};
use ndarray::Array2;
use std::collections::HashMap;
use tracing::info;

/// Immutable after `build`; every query is a read over the prebuilt
/// matrices.
#[derive(Debug)]
pub struct ContentEngine {
    movies: Vec<Movie>,
    index: HashMap<MovieId, usize>,
    vectorizer: TfidfVectorizer,
    weights: Array2<f64>,
    similarity: Array2<f64>,
}

impl ContentEngine {
    /// Vectorize every movie's feature text and compute the full cosine
    /// similarity matrix. Errors on an empty catalog.
    pub fn build(movies: Vec<Movie>, config: &ContentConfig) -> CineResult<Self> {
        if movies.is_empty() {
            return Err(CineError::EmptyCatalog);
        }

        let documents: Vec<String> = movies.iter().map(features::feature_text).collect();
        let (vectorizer, weights) = TfidfVectorizer::fit(&documents, config.max_features);
        let similarity = similarity::pairwise_rows(weights.view());

        let index = movies
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id, i))
            .collect();

        info!(
            movies = movies.len(),
            terms = vectorizer.vocabulary_len(),
            "Built content similarity model"
        );

        Ok(Self {
            movies,
            index,
            vectorizer,
            weights,
            similarity,
        })
    }

    /// Movies most similar to `movie_id`, best first, excluding the movie
    /// itself. Scores are similarity × 100 rounded to one decimal.
    /// Unknown ids yield an empty list.
    pub fn similar_to(&self, movie_id: MovieId, limit: usize) -> Vec<SimilarityHit> {
        let Some(&row) = self.index.get(&movie_id) else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, f64)> = (0..self.movies.len())
            .filter(|&i| i != row)
            .map(|i| (i, self.similarity[[row, i]]))
            .collect();
        sort_scores_desc(&mut ranked);
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|(i, score)| self.similarity_hit(i, (score * 1000.0).round() / 10.0))
            .collect()
    }

    /// Rank the catalog against a pseudo-document built from the genre
    /// list, keeping movies rated at least `min_rating`. A genre absent
    /// from the catalog simply contributes nothing.
    pub fn query_by_genres(
        &self,
        genres: &[String],
        limit: usize,
        min_rating: f64,
    ) -> Vec<SimilarityHit> {
        let query = genres.join(" ").to_lowercase();
        let query_vector = self.vectorizer.transform(&query);

        let mut ranked: Vec<(usize, f64)> = (0..self.movies.len())
            .filter(|&i| self.movies[i].rating >= min_rating)
            .map(|i| {
                (
                    i,
                    similarity::cosine(query_vector.view(), self.weights.row(i)),
                )
            })
            .collect();
        sort_scores_desc(&mut ranked);
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|(i, score)| self.similarity_hit(i, score))
            .collect()
    }

    /// Pure filter+sort: rating ≥ `min_rating`, optional genre overlap and
    /// minimum year, best-rated first.
    pub fn query_by_rating(
        &self,
        limit: usize,
        min_rating: f64,
        genres: Option<&[String]>,
        year_from: Option<i32>,
    ) -> Vec<RatedHit> {
        let wanted: Option<Vec<String>> =
            genres.map(|gs| gs.iter().map(|g| g.to_lowercase()).collect());

        let mut matches: Vec<&Movie> = self
            .movies
            .iter()
            .filter(|m| m.rating >= min_rating)
            .filter(|m| match &wanted {
                Some(wanted) => m
                    .genres
                    .iter()
                    .any(|g| wanted.iter().any(|w| g.to_lowercase().contains(w))),
                None => true,
            })
            .filter(|m| match year_from {
                Some(year) => m.year >= year,
                None => true,
            })
            .collect();

        matches.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(limit);
        matches.into_iter().map(rated_hit).collect()
    }

    /// Case-insensitive substring match on the director field, best-rated
    /// first.
    pub fn query_by_director(&self, pattern: &str, limit: usize) -> Vec<RatedHit> {
        let needle = pattern.to_lowercase();
        let mut matches: Vec<&Movie> = self
            .movies
            .iter()
            .filter(|m| m.director.to_lowercase().contains(&needle))
            .collect();
        matches.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(limit);
        matches.into_iter().map(rated_hit).collect()
    }

    /// Raw cosine similarity between two catalog movies, if both exist.
    pub fn similarity_between(&self, id_a: MovieId, id_b: MovieId) -> Option<f64> {
        let &a = self.index.get(&id_a)?;
        let &b = self.index.get(&id_b)?;
        Some(self.similarity[[a, b]])
    }

    pub fn similarity_matrix(&self) -> &Array2<f64> {
        &self.similarity
    }

    fn similarity_hit(&self, index: usize, score: f64) -> SimilarityHit {
        let movie = &self.movies[index];
        SimilarityHit {
            movie_id: movie.id,
            title: movie.title.clone(),
            score,
            rating: movie.rating,
            year: movie.year,
        }
    }
}

fn rated_hit(movie: &Movie) -> RatedHit {
    RatedHit {
        movie_id: movie.id,
        title: movie.title.clone(),
        rating: movie.rating,
        genres: movie.genres.clone(),
        year: movie.year,
    }
}

/// Descending by score; stable, so ties keep catalog order.
fn sort_scores_desc(scores: &mut [(usize, f64)]) {
    scores.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(
        id: MovieId,
        title: &str,
        year: i32,
        genres: &[&str],
        rating: f64,
        director: &str,
    ) -> Movie {
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

    fn engine() -> ContentEngine {
        // A and B share all genres and the director; C shares nothing.
        ContentEngine::build(
            vec![
                movie(1, "A", 1999, &["Action", "Thriller"], 7.5, "Ramesh Sippy"),
                movie(2, "B", 2005, &["Action", "Thriller"], 8.0, "Ramesh Sippy"),
                movie(3, "C", 2010, &["Romance"], 6.5, "Karan Johar"),
            ],
            &ContentConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = ContentEngine::build(Vec::new(), &ContentConfig::default()).unwrap_err();
        assert!(matches!(err, CineError::EmptyCatalog));
    }

    #[test]
    fn similar_to_ranks_shared_features_first() {
        let engine = engine();
        let hits = engine.similar_to(1, 10);
        assert_eq!(hits[0].movie_id, 2);
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn similar_to_never_returns_self_or_exceeds_limit() {
        let engine = engine();
        let hits = engine.similar_to(1, 1);
        assert_eq!(hits.len(), 1);
        assert!(hits.iter().all(|h| h.movie_id != 1));
    }

    #[test]
    fn similar_to_unknown_id_is_empty() {
        assert!(engine().similar_to(999, 10).is_empty());
    }

    #[test]
    fn similar_to_score_is_percent_with_one_decimal() {
        let engine = engine();
        let hits = engine.similar_to(1, 10);
        for hit in hits {
            assert!(hit.score >= 0.0 && hit.score <= 100.0);
            assert!((hit.score * 10.0 - (hit.score * 10.0).round()).abs() < 1e-9);
        }
    }

    #[test]
    fn similarity_matrix_is_symmetric_with_unit_diagonal() {
        let engine = engine();
        let sim = engine.similarity_matrix();
        for i in 0..3 {
            assert!((sim[[i, i]] - 1.0).abs() < 1e-9);
            for j in 0..3 {
                assert!((sim[[i, j]] - sim[[j, i]]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn query_by_genres_ranks_matching_movies_first() {
        let engine = engine();
        let hits = engine.query_by_genres(&["Romance".to_string()], 10, 0.0);
        assert_eq!(hits[0].movie_id, 3);
    }

    #[test]
    fn query_by_genres_applies_min_rating_filter() {
        let engine = engine();
        let hits = engine.query_by_genres(&["Action".to_string()], 10, 7.8);
        assert!(hits.iter().all(|h| h.rating >= 7.8));
        assert_eq!(hits[0].movie_id, 2);
    }

    #[test]
    fn query_by_unknown_genre_never_errors() {
        let engine = engine();
        // "Documentary" is out of vocabulary; ranking degrades to zero
        // scores rather than failing.
        let hits = engine.query_by_genres(&["Documentary".to_string()], 10, 0.0);
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| h.score == 0.0));
    }

    #[test]
    fn query_by_rating_filters_and_sorts_descending() {
        let engine = engine();
        let hits = engine.query_by_rating(10, 7.0, None, None);
        assert_eq!(hits.len(), 2);
        assert!(hits.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert!(hits.iter().all(|h| h.rating >= 7.0));
    }

    #[test]
    fn query_by_rating_honors_genre_and_year_filters() {
        let engine = engine();
        let genres = vec!["Action".to_string()];
        let hits = engine.query_by_rating(10, 0.0, Some(&genres), Some(2000));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].movie_id, 2);
    }

    #[test]
    fn query_by_director_is_case_insensitive_substring() {
        let engine = engine();
        let hits = engine.query_by_director("SIPPY", 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].movie_id, 2);
    }

    #[test]
    fn similarity_between_known_and_unknown_ids() {
        let engine = engine();
        let s = engine.similarity_between(1, 2).unwrap();
        assert!(s > 0.5);
        assert!(engine.similarity_between(1, 999).is_none());
    }
}
