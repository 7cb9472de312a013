//! Request-scoped document types for the retrieval pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A fetched source page, before splitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// URL the page was fetched from.
    pub url: String,
    /// Extracted plain text content.
    pub text: String,
    /// When the page was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl SourceDocument {
    /// Create a source document fetched just now.
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            fetched_at: Utc::now(),
        }
    }
}

/// A bounded-length fragment of a source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// URL of the document this chunk came from.
    pub source: String,
    /// Position of this chunk within the document (0-based).
    pub index: usize,
    /// The chunk text.
    pub content: String,
    /// SHA-256 hash of the content.
    pub hash: String,
}

impl DocumentChunk {
    /// Create a chunk, computing its content hash.
    pub fn new(source: impl Into<String>, index: usize, content: impl Into<String>) -> Self {
        let content = content.into();

        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        let hash = format!("{:x}", hasher.finalize());

        Self {
            source: source.into(),
            index,
            content,
            hash,
        }
    }
}

/// A chunk paired with its similarity to a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The matched chunk.
    pub chunk: DocumentChunk,
    /// Cosine similarity to the query (-1.0 to 1.0).
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_hash_deterministic() {
        let a = DocumentChunk::new("https://example.com", 0, "Vienna");
        let b = DocumentChunk::new("https://example.com", 1, "Vienna");
        assert_eq!(a.hash, b.hash);

        let c = DocumentChunk::new("https://example.com", 0, "Salzburg");
        assert_ne!(a.hash, c.hash);
    }
}
