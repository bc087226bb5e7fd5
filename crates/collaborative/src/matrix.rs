//! Rating Matrix Builder — pivots (user, movie, rating) triples into a
//! dense user×movie table.
//!
//! Cells are `Option<f64>`: `None` is the explicit "unrated" sentinel, so
//! mean and neighbor computations can never mistake an unrated cell for a
//! rating of zero. Dense vectors handed to the similarity code map `None`
//! to 0.0, which is safe because the rating scale starts at 0.5.

use cine_core::types::{MovieId, Rating, UserId};
use ndarray::{Array1, Array2};
use std::collections::{BTreeSet, HashMap};

pub struct RatingMatrix {
    user_ids: Vec<UserId>,
    movie_ids: Vec<MovieId>,
    user_index: HashMap<UserId, usize>,
    movie_index: HashMap<MovieId, usize>,
    cells: Array2<Option<f64>>,
}

impl RatingMatrix {
    /// Pivot the rating set. Rows are distinct user ids sorted ascending,
    /// columns distinct movie ids sorted ascending. Duplicate
    /// (user, movie) rows resolve last-write-wins in input order.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let user_ids: Vec<UserId> = ratings
            .iter()
            .map(|r| r.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let movie_ids: Vec<MovieId> = ratings
            .iter()
            .map(|r| r.movie_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let user_index: HashMap<UserId, usize> =
            user_ids.iter().enumerate().map(|(i, &u)| (u, i)).collect();
        let movie_index: HashMap<MovieId, usize> =
            movie_ids.iter().enumerate().map(|(i, &m)| (m, i)).collect();

        let mut cells: Array2<Option<f64>> =
            Array2::from_elem((user_ids.len(), movie_ids.len()), None);
        for rating in ratings {
            let row = user_index[&rating.user_id];
            let col = movie_index[&rating.movie_id];
            cells[[row, col]] = Some(rating.score);
        }

        Self {
            user_ids,
            movie_ids,
            user_index,
            movie_index,
            cells,
        }
    }

    pub fn num_users(&self) -> usize {
        self.user_ids.len()
    }

    pub fn num_movies(&self) -> usize {
        self.movie_ids.len()
    }

    pub fn user_index(&self, user_id: UserId) -> Option<usize> {
        self.user_index.get(&user_id).copied()
    }

    pub fn movie_index(&self, movie_id: MovieId) -> Option<usize> {
        self.movie_index.get(&movie_id).copied()
    }

    pub fn user_id_at(&self, row: usize) -> UserId {
        self.user_ids[row]
    }

    pub fn movie_id_at(&self, col: usize) -> MovieId {
        self.movie_ids[col]
    }

    pub fn rating(&self, row: usize, col: usize) -> Option<f64> {
        self.cells[[row, col]]
    }

    /// Mean of the user's rated cells, `None` when the user rated nothing.
    pub fn user_mean(&self, row: usize) -> Option<f64> {
        let rated: Vec<f64> = self.cells.row(row).iter().flatten().copied().collect();
        if rated.is_empty() {
            None
        } else {
            Some(rated.iter().sum::<f64>() / rated.len() as f64)
        }
    }

    /// Dense user rating vector for similarity computation (unrated → 0.0).
    pub fn user_vector(&self, row: usize) -> Array1<f64> {
        Array1::from_iter(self.cells.row(row).iter().map(|c| c.unwrap_or(0.0)))
    }

    /// The full dense matrix with unrated cells as 0.0.
    pub fn dense(&self) -> Array2<f64> {
        self.cells.mapv(|c| c.unwrap_or(0.0))
    }
}
