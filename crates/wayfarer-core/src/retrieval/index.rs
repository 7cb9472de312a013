//! Ephemeral in-memory vector index.
//!
//! Holds (chunk, vector) pairs for the lifetime of a single retrieval
//! call. Search is brute-force cosine similarity over all stored
//! vectors; ranking is stable, so ties keep insertion order and results
//! are deterministic for a deterministic embedder.

use super::document::{DocumentChunk, ScoredChunk};

/// In-memory collection of embedded chunks.
#[derive(Default)]
pub struct VectorIndex {
    entries: Vec<(DocumentChunk, Vec<f32>)>,
}

impl VectorIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a chunk with its embedding vector.
    pub fn insert(&mut self, chunk: DocumentChunk, vector: Vec<f32>) {
        self.entries.push((chunk, vector));
    }

    /// Number of stored chunks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the `top_k` chunks most similar to the query vector,
    /// in descending similarity order.
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|(chunk, vector)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_sim(query, vector),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        scored
    }
}

fn cosine_sim(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a < f32::EPSILON || mag_b < f32::EPSILON {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(index: usize, content: &str) -> DocumentChunk {
        DocumentChunk::new("https://example.com", index, content)
    }

    #[test]
    fn test_cosine_sim_identical_vectors() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_sim(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_sim_orthogonal_vectors() {
        assert!((cosine_sim(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_sim_mismatched_lengths() {
        assert_eq!(cosine_sim(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_search_ranks_by_similarity() {
        let mut index = VectorIndex::new();
        index.insert(chunk(0, "far"), vec![0.0, 1.0]);
        index.insert(chunk(1, "near"), vec![1.0, 0.1]);
        index.insert(chunk(2, "middle"), vec![0.7, 0.7]);

        let results = index.search(&[1.0, 0.0], 3);
        assert_eq!(results[0].chunk.content, "near");
        assert_eq!(results[1].chunk.content, "middle");
        assert_eq!(results[2].chunk.content, "far");
        assert!(results[0].score >= results[1].score);
        assert!(results[1].score >= results[2].score);
    }

    #[test]
    fn test_search_truncates_to_top_k() {
        let mut index = VectorIndex::new();
        for i in 0..10 {
            index.insert(chunk(i, &format!("chunk {i}")), vec![1.0, i as f32]);
        }
        assert_eq!(index.search(&[1.0, 0.0], 4).len(), 4);
    }

    #[test]
    fn test_search_empty_index() {
        let index = VectorIndex::new();
        assert!(index.search(&[1.0, 0.0], 4).is_empty());
    }

    #[test]
    fn test_search_deterministic_on_ties() {
        let mut index = VectorIndex::new();
        index.insert(chunk(0, "first"), vec![1.0, 0.0]);
        index.insert(chunk(1, "second"), vec![1.0, 0.0]);

        let results = index.search(&[1.0, 0.0], 2);
        assert_eq!(results[0].chunk.content, "first");
        assert_eq!(results[1].chunk.content, "second");
    }
}
