use serde::{Deserialize, Serialize};

pub type MovieId = u32;
pub type UserId = u32;

/// Valid range of user rating scores.
pub const RATING_SCALE_MIN: f64 = 0.5;
pub const RATING_SCALE_MAX: f64 = 5.0;

/// A catalog entry. Immutable after load; identified by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    #[serde(alias = "movieId")]
    pub id: MovieId,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub year: i32,
    /// Ordered genre tags as they appear in the source data.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Critic rating on the 0-10 IMDb scale (distinct from user ratings).
    #[serde(default, alias = "imdb_rating")]
    pub rating: f64,
    #[serde(default = "default_director")]
    pub director: String,
    /// Ordered cast names.
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub language: String,
}

fn default_title() -> String {
    "Unknown".to_string()
}

fn default_director() -> String {
    "Unknown".to_string()
}

/// A single user rating on the 0.5-5.0 scale. A user rates a movie at most
/// once; duplicate rows resolve last-write-wins when the matrix is built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    #[serde(alias = "userId")]
    pub user_id: UserId,
    #[serde(alias = "movieId")]
    pub movie_id: MovieId,
    #[serde(alias = "rating")]
    pub score: f64,
}

/// A movie ranked by content or rating-vector similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityHit {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f64,
    pub rating: f64,
    pub year: i32,
}

/// A movie returned by a pure filter/sort query (no vectorization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatedHit {
    pub movie_id: MovieId,
    pub title: String,
    pub rating: f64,
    pub genres: Vec<String>,
    pub year: i32,
}

/// A movie with a collaborative-filtering rating prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictedHit {
    pub movie_id: MovieId,
    pub title: String,
    pub predicted: f64,
}

/// Collaborative filtering neighborhood mode, fixed at engine construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CfMode {
    UserBased,
    ItemBased,
}

impl std::str::FromStr for CfMode {
    type Err = crate::error::CineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" | "user_based" | "user-based" => Ok(CfMode::UserBased),
            "item" | "item_based" | "item-based" => Ok(CfMode::ItemBased),
            other => Err(crate::error::CineError::Config(format!(
                "unknown collaborative filtering mode '{other}', expected 'user' or 'item'"
            ))),
        }
    }
}

impl std::fmt::Display for CfMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CfMode::UserBased => write!(f, "user-based"),
            CfMode::ItemBased => write!(f, "item-based"),
        }
    }
}

/// Tagged query results, one variant per query family. Downstream
/// formatters match on the variant instead of inspecting value shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "hits")]
pub enum QueryOutput {
    Similarity(Vec<SimilarityHit>),
    Rated(Vec<RatedHit>),
    Predicted(Vec<PredictedHit>),
}

impl QueryOutput {
    pub fn is_empty(&self) -> bool {
        match self {
            QueryOutput::Similarity(hits) => hits.is_empty(),
            QueryOutput::Rated(hits) => hits.is_empty(),
            QueryOutput::Predicted(hits) => hits.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            QueryOutput::Similarity(hits) => hits.len(),
            QueryOutput::Rated(hits) => hits.len(),
            QueryOutput::Predicted(hits) => hits.len(),
        }
    }
}
