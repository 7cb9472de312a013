use async_trait::async_trait;

use wayfarer_core::config::IngestConfig;
use wayfarer_core::retrieval::{
    DocumentChunk, Embedder, RetrievalError, SourceDocument, TextSplitter, VectorIndex,
};

/// Deterministic embedder: a letter-frequency vector over a-z.
///
/// The real embedding services are non-deterministic across calls and
/// environments; this stub makes ranking assertions reproducible.
struct FrequencyEmbedder;

fn frequency_vector(text: &str) -> Vec<f32> {
    let mut counts = vec![0.0f32; 26];
    for ch in text.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_lowercase() {
            counts[(lower as u8 - b'a') as usize] += 1.0;
        }
    }
    counts
}

#[async_trait]
impl Embedder for FrequencyEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        Ok(texts.iter().map(|t| frequency_vector(t)).collect())
    }

    fn model_name(&self) -> &str {
        "frequency-stub"
    }
}

fn default_splitter() -> TextSplitter {
    TextSplitter::new(&IngestConfig::default())
}

fn doc(text: &str) -> SourceDocument {
    SourceDocument::new("https://example.com/austria", text)
}

#[test]
fn test_chunks_respect_size_limit() {
    let text = "Vienna and the Danube valley. ".repeat(200);
    let chunks = default_splitter().split(&doc(&text));

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.content.chars().count() <= 1000);
    }
}

#[test]
fn test_chunks_overlap_exactly() {
    let text: String = (0..5000)
        .map(|i| char::from(b'a' + (i % 26) as u8))
        .collect();
    let chunks = default_splitter().split(&doc(&text));

    for pair in chunks.windows(2) {
        let prev: Vec<char> = pair[0].content.chars().collect();
        let next: Vec<char> = pair[1].content.chars().collect();
        assert_eq!(&prev[prev.len() - 200..], &next[..200]);
    }
}

#[test]
fn test_empty_page_produces_no_chunks() {
    assert!(default_splitter().split(&doc("")).is_empty());
}

#[tokio::test]
async fn test_retrieval_ordering_is_deterministic() {
    let embedder = FrequencyEmbedder;
    let contents = [
        "aaaa aaaa aaaa",
        "eeee eeee eeee",
        "aaee aaee",
        "zzzz zzzz",
    ];

    let run = || async {
        let chunks: Vec<DocumentChunk> = contents
            .iter()
            .enumerate()
            .map(|(i, c)| DocumentChunk::new("https://example.com", i, *c))
            .collect();

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = embedder.embed(&texts).await.unwrap();

        let mut index = VectorIndex::new();
        for (chunk, vector) in chunks.into_iter().zip(vectors) {
            index.insert(chunk, vector);
        }

        let query = embedder.embed(&["aaaa".to_string()]).await.unwrap();
        index
            .search(&query[0], 4)
            .into_iter()
            .map(|scored| scored.chunk.content)
            .collect::<Vec<_>>()
    };

    let first = run().await;
    let second = run().await;

    assert_eq!(first, second);
    // The all-'a' chunk matches an all-'a' query best.
    assert_eq!(first[0], "aaaa aaaa aaaa");
}

#[tokio::test]
async fn test_scores_descend() {
    let embedder = FrequencyEmbedder;
    let mut index = VectorIndex::new();

    for (i, content) in ["abc abc", "aab aab", "xyz"].iter().enumerate() {
        let vector = embedder.embed(&[content.to_string()]).await.unwrap();
        index.insert(
            DocumentChunk::new("https://example.com", i, *content),
            vector.into_iter().next().unwrap(),
        );
    }

    let query = embedder.embed(&["aaa".to_string()]).await.unwrap();
    let results = index.search(&query[0], 3);

    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}
