//! Collaborative filtering — user×movie rating matrix, user/item cosine
//! similarity, and k-nearest-neighbor rating prediction.

pub mod engine;
pub mod matrix;
pub mod metrics;

pub use engine::CfEngine;
pub use matrix::RatingMatrix;
