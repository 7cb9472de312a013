use thiserror::Error;

/// Errors that can occur during ingestion and retrieval.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Failed to fetch source page: {0}")]
    Fetch(String),

    #[error("Embedding error: {0}")]
    Embedding(String),
}

impl From<reqwest::Error> for RetrievalError {
    fn from(err: reqwest::Error) -> Self {
        RetrievalError::Fetch(err.to_string())
    }
}
