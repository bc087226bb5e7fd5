use thiserror::Error;

pub type CineResult<T> = Result<T, CineError>;

#[derive(Error, Debug)]
pub enum CineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot build a similarity model over an empty catalog")]
    EmptyCatalog,

    #[error("Data loading error: {0}")]
    DataLoad(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
