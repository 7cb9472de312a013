//! Ingestion and similarity retrieval over a single source page.
//!
//! On every call the retriever fetches the configured page, splits its
//! text into overlapping chunks, embeds them into an ephemeral
//! [`VectorIndex`], embeds the query with the same [`Embedder`], and
//! returns the top-k chunks by cosine similarity. Nothing is cached or
//! persisted; the index lives for one call.
//!
//! # Components
//!
//! - [`DocumentRetriever`] - Main facade implementing [`Retriever`]
//! - [`PageLoader`] - Page fetch + HTML text extraction
//! - [`TextSplitter`] - Fixed-size character splitter with overlap
//! - [`Embedder`] - Hosted or local embedding generation
//! - [`VectorIndex`] - Brute-force cosine similarity search

mod document;
mod embedder;
mod error;
mod index;
mod loader;
mod splitter;

pub use document::{DocumentChunk, ScoredChunk, SourceDocument};
pub use embedder::{build_embedder, Embedder, LocalEmbedder, OpenAIEmbedder};
pub use error::RetrievalError;
pub use index::VectorIndex;
pub use loader::PageLoader;
pub use splitter::TextSplitter;

use async_trait::async_trait;

use crate::config::{EmbeddingConfig, IngestConfig};

/// A capability that returns the chunks most relevant to a query.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Retrieve relevant chunks, in descending similarity order.
    async fn retrieve(&self, query: &str) -> Result<Vec<DocumentChunk>, RetrievalError>;
}

/// The main retriever: fetch, split, embed, rank.
pub struct DocumentRetriever {
    loader: PageLoader,
    splitter: TextSplitter,
    embedder: Box<dyn Embedder>,
    source_url: String,
    top_k: usize,
}

impl DocumentRetriever {
    /// Creates a retriever with an embedder built from configuration.
    pub fn new(
        ingest: &IngestConfig,
        embedding: &EmbeddingConfig,
    ) -> Result<Self, RetrievalError> {
        let embedder = build_embedder(embedding)?;
        Self::with_embedder(ingest, embedder)
    }

    /// Creates a retriever with an explicit embedder.
    pub fn with_embedder(
        ingest: &IngestConfig,
        embedder: Box<dyn Embedder>,
    ) -> Result<Self, RetrievalError> {
        Ok(Self {
            loader: PageLoader::new(ingest)?,
            splitter: TextSplitter::new(ingest),
            embedder,
            source_url: ingest.source_url.clone(),
            top_k: ingest.top_k,
        })
    }
}

#[async_trait]
impl Retriever for DocumentRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<DocumentChunk>, RetrievalError> {
        // An unreachable source page degrades to an empty result set;
        // the pipeline still answers from the research context alone.
        let doc = match self.loader.load(&self.source_url).await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(url = %self.source_url, error = %e, "source page unreachable, returning no documents");
                return Ok(Vec::new());
            }
        };

        let chunks = self.splitter.split(&doc);
        if chunks.is_empty() {
            tracing::warn!(url = %self.source_url, "source page had no text, returning no documents");
            return Ok(Vec::new());
        }

        tracing::debug!(
            url = %self.source_url,
            chunks = chunks.len(),
            model = self.embedder.model_name(),
            "embedding source chunks"
        );

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = self.embedder.embed(&texts).await?;

        let mut index = VectorIndex::new();
        for (chunk, vector) in chunks.into_iter().zip(vectors.into_iter()) {
            index.insert(chunk, vector);
        }

        let query_vectors = self.embedder.embed(&[query.to_string()]).await?;
        let query_vector = query_vectors.first().ok_or_else(|| {
            RetrievalError::Embedding("embedder returned no vector for the query".to_string())
        })?;

        let results = index.search(query_vector, self.top_k);
        Ok(results.into_iter().map(|scored| scored.chunk).collect())
    }
}
