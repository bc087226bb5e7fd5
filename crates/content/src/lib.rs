//! Content-based similarity — TF-IDF feature vectors over genre, director,
//! and cast text, with an all-pairs cosine similarity matrix.

pub mod engine;
pub mod features;
pub mod similarity;
pub mod tfidf;

pub use engine::ContentEngine;
pub use tfidf::TfidfVectorizer;
