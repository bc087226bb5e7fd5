//! Collaborative Filtering Engine — k-nearest-neighbor rating prediction
//! over user-user or item-item cosine similarity.

use crate::matrix::RatingMatrix;
use cine_core::error::{CineError, CineResult};
use cine_core::types::{
    CfMode, Movie, MovieId, PredictedHit, Rating, UserId, RATING_SCALE_MAX, RATING_SCALE_MIN,
};
use cine_content::similarity;
use ndarray::Array2;
use std::collections::HashMap;
use tracing::info;

/// Immutable after `build`. The similarity matrix is over matrix rows
/// (user-based) or columns (item-based), fixed by `mode` at construction.
pub struct CfEngine {
    mode: CfMode,
    matrix: RatingMatrix,
    similarity: Array2<f64>,
    titles: HashMap<MovieId, String>,
}

impl CfEngine {
    /// Pivot the rating set and eagerly compute the full similarity
    /// matrix for the chosen mode. An empty rating set builds a 0×0
    /// model whose queries all come back empty.
    pub fn build(ratings: &[Rating], movies: &[Movie], mode: CfMode) -> Self {
        let matrix = RatingMatrix::from_ratings(ratings);
        let dense = matrix.dense();
        let similarity = match mode {
            CfMode::UserBased => similarity::pairwise_rows(dense.view()),
            CfMode::ItemBased => similarity::pairwise_rows(dense.t()),
        };

        let titles = movies
            .iter()
            .map(|m| (m.id, m.title.clone()))
            .collect();

        info!(
            mode = %mode,
            users = matrix.num_users(),
            movies = matrix.num_movies(),
            "Built collaborative filtering model"
        );

        Self {
            mode,
            matrix,
            similarity,
            titles,
        }
    }

    pub fn mode(&self) -> CfMode {
        self.mode
    }

    /// Predict the rating `user_id` would give `movie_id`, considering at
    /// most `k` neighbors. `None` means no prediction is possible — this
    /// is never conflated with a numeric rating.
    pub fn predict_rating(&self, user_id: UserId, movie_id: MovieId, k: usize) -> Option<f64> {
        match self.mode {
            CfMode::UserBased => self.predict_user_based(user_id, movie_id, k),
            CfMode::ItemBased => self.predict_item_based(user_id, movie_id, k),
        }
    }

    fn predict_user_based(&self, user_id: UserId, movie_id: MovieId, k: usize) -> Option<f64> {
        let user_row = self.matrix.user_index(user_id)?;
        let movie_col = self.matrix.movie_index(movie_id)?;
        let user_mean = self.matrix.user_mean(user_row)?;

        // (similarity, their rating of the movie, their own mean) — kept
        // together so the top-k cut cannot misalign them.
        let mut neighbors: Vec<(f64, f64, f64)> = Vec::new();
        for row in 0..self.matrix.num_users() {
            if row == user_row {
                continue;
            }
            let Some(rating) = self.matrix.rating(row, movie_col) else {
                continue;
            };
            let sim = self.similarity[[user_row, row]];
            if sim <= 0.0 {
                continue;
            }
            if let Some(mean) = self.matrix.user_mean(row) {
                neighbors.push((sim, rating, mean));
            }
        }
        if neighbors.is_empty() {
            return None;
        }

        top_k_by_similarity(&mut neighbors, k);

        let numerator: f64 = neighbors.iter().map(|(s, r, m)| s * (r - m)).sum();
        let denominator: f64 = neighbors.iter().map(|(s, _, _)| s.abs()).sum();
        if denominator == 0.0 {
            return None;
        }

        Some(clamp_to_scale(user_mean + numerator / denominator))
    }

    fn predict_item_based(&self, user_id: UserId, movie_id: MovieId, k: usize) -> Option<f64> {
        let user_row = self.matrix.user_index(user_id)?;
        let movie_col = self.matrix.movie_index(movie_id)?;

        let mut neighbors: Vec<(f64, f64, f64)> = Vec::new();
        for col in 0..self.matrix.num_movies() {
            if col == movie_col {
                continue;
            }
            let Some(rating) = self.matrix.rating(user_row, col) else {
                continue;
            };
            let sim = self.similarity[[movie_col, col]];
            if sim > 0.0 {
                neighbors.push((sim, rating, 0.0));
            }
        }
        if neighbors.is_empty() {
            return None;
        }

        top_k_by_similarity(&mut neighbors, k);

        let numerator: f64 = neighbors.iter().map(|(s, r, _)| s * r).sum();
        let denominator: f64 = neighbors.iter().map(|(s, _, _)| s.abs()).sum();
        if denominator == 0.0 {
            return None;
        }

        Some(clamp_to_scale(numerator / denominator))
    }

    /// Predict every movie the user has not rated, keep predictions of at
    /// least `min_predicted`, best first (ties keep catalog order).
    /// Unknown users get an empty list.
    pub fn recommend_for_user(
        &self,
        user_id: UserId,
        limit: usize,
        k: usize,
        min_predicted: f64,
    ) -> Vec<PredictedHit> {
        let Some(user_row) = self.matrix.user_index(user_id) else {
            return Vec::new();
        };

        let mut hits: Vec<PredictedHit> = Vec::new();
        for col in 0..self.matrix.num_movies() {
            if self.matrix.rating(user_row, col).is_some() {
                continue;
            }
            let movie_id = self.matrix.movie_id_at(col);
            let Some(predicted) = self.predict_rating(user_id, movie_id, k) else {
                continue;
            };
            if predicted < min_predicted {
                continue;
            }
            // Movies missing from the catalog table have no title to show.
            let Some(title) = self.titles.get(&movie_id) else {
                continue;
            };
            hits.push(PredictedHit {
                movie_id,
                title: title.clone(),
                predicted,
            });
        }

        hits.sort_by(|a, b| {
            b.predicted
                .partial_cmp(&a.predicted)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit);
        hits
    }

    /// Users most similar to `user_id`, excluding the user. Only valid in
    /// user-based mode; unknown ids yield an empty list.
    pub fn similar_users(&self, user_id: UserId, limit: usize) -> CineResult<Vec<(UserId, f64)>> {
        if self.mode != CfMode::UserBased {
            return Err(CineError::Config(
                "similar_users requires a user-based model".to_string(),
            ));
        }
        let Some(user_row) = self.matrix.user_index(user_id) else {
            return Ok(Vec::new());
        };

        let mut ranked: Vec<(usize, f64)> = (0..self.matrix.num_users())
            .filter(|&row| row != user_row)
            .map(|row| (row, self.similarity[[user_row, row]]))
            .collect();
        sort_scores_desc(&mut ranked);
        ranked.truncate(limit);

        Ok(ranked
            .into_iter()
            .map(|(row, score)| (self.matrix.user_id_at(row), score))
            .collect())
    }

    /// Movies with the most similar rating vectors to `movie_id`,
    /// excluding the movie. Only valid in item-based mode; unknown ids
    /// yield an empty list. Movies absent from the catalog table are
    /// skipped (no title to report).
    pub fn similar_movies(
        &self,
        movie_id: MovieId,
        limit: usize,
    ) -> CineResult<Vec<(MovieId, String, f64)>> {
        if self.mode != CfMode::ItemBased {
            return Err(CineError::Config(
                "similar_movies requires an item-based model".to_string(),
            ));
        }
        let Some(movie_col) = self.matrix.movie_index(movie_id) else {
            return Ok(Vec::new());
        };

        let mut ranked: Vec<(usize, f64)> = (0..self.matrix.num_movies())
            .filter(|&col| col != movie_col)
            .map(|col| (col, self.similarity[[movie_col, col]]))
            .collect();
        sort_scores_desc(&mut ranked);

        let mut out = Vec::new();
        for (col, score) in ranked {
            if out.len() >= limit {
                break;
            }
            let id = self.matrix.movie_id_at(col);
            if let Some(title) = self.titles.get(&id) {
                out.push((id, title.clone(), score));
            }
        }
        Ok(out)
    }

    pub fn similarity_matrix(&self) -> &Array2<f64> {
        &self.similarity
    }
}

fn clamp_to_scale(prediction: f64) -> f64 {
    prediction.clamp(RATING_SCALE_MIN, RATING_SCALE_MAX)
}

/// Keep the `k` most similar neighbors. Sort is by similarity descending
/// and the pre-sort order (ascending matrix index) breaks ties, so the
/// cut is deterministic for a fixed input.
fn top_k_by_similarity(neighbors: &mut Vec<(f64, f64, f64)>, k: usize) {
    neighbors.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    neighbors.truncate(k);
}

fn sort_scores_desc(scores: &mut [(usize, f64)]) {
    scores.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
