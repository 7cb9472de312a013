//! Embedding generation for similarity search.
//!
//! The default embedder calls a hosted OpenAI-compatible `/embeddings`
//! endpoint; a local fastembed model is available for offline use.

use std::path::PathBuf;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use serde::{Deserialize, Serialize};

use crate::config::EmbeddingConfig;

use super::error::RetrievalError;

/// Trait for embedding generation.
///
/// The same embedder must be used for chunks and queries so their
/// vectors live in one space.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embeddings for a batch of texts.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError>;

    /// Get the model name.
    fn model_name(&self) -> &str;
}

/// Builds an embedder from configuration.
pub fn build_embedder(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>, RetrievalError> {
    match config.provider.as_str() {
        "local" | "fastembed" => Ok(Box::new(LocalEmbedder::new()?)),
        _ => Ok(Box::new(OpenAIEmbedder::from_config(config)?)),
    }
}

/// Hosted embeddings via an OpenAI-compatible `/embeddings` endpoint.
pub struct OpenAIEmbedder {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAIEmbedder {
    /// Creates a new hosted embedder.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base = base_url.into();
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/embeddings", base.trim_end_matches('/')),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Creates a hosted embedder from the embedding configuration.
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self, RetrievalError> {
        let api_key = config.api_key_or_env().ok_or_else(|| {
            RetrievalError::Embedding(
                "missing embeddings API key; set OPENAI_API_KEY or WAYFARER_EMBEDDING_API_KEY"
                    .to_string(),
            )
        })?;

        Ok(Self::new(
            config.base_url_or_default(),
            api_key,
            config.model_or_default(),
        ))
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| RetrievalError::Embedding(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::Embedding(format!(
                "embeddings request failed with HTTP {status}: {body}"
            )));
        }

        let mut parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::Embedding(e.to_string()))?;

        // The API may return entries out of order.
        parsed.data.sort_by_key(|entry| entry.index);

        if parsed.data.len() != texts.len() {
            return Err(RetrievalError::Embedding(format!(
                "got {} embeddings for {} inputs",
                parsed.data.len(),
                texts.len()
            )));
        }

        Ok(parsed.data.into_iter().map(|entry| entry.embedding).collect())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

/// Local embedder using fastembed's BGE-Small model.
pub struct LocalEmbedder {
    model: TextEmbedding,
    model_name: String,
}

impl LocalEmbedder {
    /// Create a local embedder with the default model.
    /// Uses `~/.wayfarer/cache/` as the model cache directory.
    pub fn new() -> Result<Self, RetrievalError> {
        Self::with_model(EmbeddingModel::BGESmallENV15)
    }

    /// Create a local embedder with a specific model.
    pub fn with_model(model: EmbeddingModel) -> Result<Self, RetrievalError> {
        let model_name = format!("{:?}", model);
        let cache_dir = Self::default_cache_dir();

        std::fs::create_dir_all(&cache_dir).map_err(|e| {
            RetrievalError::Embedding(format!("Failed to create cache directory: {}", e))
        })?;

        let text_embedding = TextEmbedding::try_new(
            InitOptions::new(model)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(false),
        )
        .map_err(|e| RetrievalError::Embedding(e.to_string()))?;

        Ok(Self {
            model: text_embedding,
            model_name,
        })
    }

    /// Get the default cache directory: `~/.wayfarer/cache/`
    fn default_cache_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".wayfarer")
            .join("cache")
    }
}

#[async_trait]
impl Embedder for LocalEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let texts_vec: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();

        self.model
            .embed(texts_vec, None)
            .map_err(|e| RetrievalError::Embedding(e.to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
