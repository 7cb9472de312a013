//! Fixed-size text splitter with overlap.
//!
//! Splits a document into chunks of at most `chunk_size` characters,
//! where each chunk after the first starts `chunk_size - chunk_overlap`
//! characters after its predecessor. Adjacent chunks therefore share
//! exactly `chunk_overlap` characters, preserving local context across
//! boundaries. Document order is preserved.

use crate::config::IngestConfig;

use super::document::{DocumentChunk, SourceDocument};

/// Character-window splitter.
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    /// Creates a splitter from the ingestion configuration.
    ///
    /// `chunk_overlap` must be smaller than `chunk_size`; the config
    /// layer validates this before construction.
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
        }
    }

    /// Splits a document into overlapping chunks, in document order.
    ///
    /// Empty text produces no chunks. Sizes and overlap are counted in
    /// characters, not bytes, so multi-byte text splits safely.
    pub fn split(&self, doc: &SourceDocument) -> Vec<DocumentChunk> {
        let text = doc.text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every char, plus a sentinel for the text end.
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        let total_chars = boundaries.len() - 1;

        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.chunk_size).min(total_chars);
            let piece = &text[boundaries[start]..boundaries[end]];
            chunks.push(DocumentChunk::new(doc.url.as_str(), chunks.len(), piece));

            if end == total_chars {
                break;
            }
            start += step;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IngestConfig;

    fn splitter(chunk_size: usize, chunk_overlap: usize) -> TextSplitter {
        TextSplitter::new(&IngestConfig {
            chunk_size,
            chunk_overlap,
            ..IngestConfig::default()
        })
    }

    fn doc(text: &str) -> SourceDocument {
        SourceDocument::new("https://example.com/guide", text)
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = splitter(1000, 200).split(&doc("Vienna is the capital of Austria."));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Vienna is the capital of Austria.");
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn test_empty_text_no_chunks() {
        assert!(splitter(1000, 200).split(&doc("")).is_empty());
        assert!(splitter(1000, 200).split(&doc("   \n  ")).is_empty());
    }

    #[test]
    fn test_chunk_size_respected() {
        let text = "a".repeat(3500);
        let chunks = splitter(1000, 200).split(&doc(&text));
        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 1000);
        }
    }

    #[test]
    fn test_exact_overlap_between_adjacent_chunks() {
        let text: String = (0..3000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = splitter(1000, 200).split(&doc(&text));
        assert!(chunks.len() > 1);

        for pair in chunks.windows(2) {
            let prev_tail: String = pair[0]
                .content
                .chars()
                .skip(pair[0].content.chars().count() - 200)
                .collect();
            let next_head: String = pair[1].content.chars().take(200).collect();
            assert_eq!(prev_tail, next_head);
        }
    }

    #[test]
    fn test_document_order_and_indices() {
        let text = "x".repeat(2500);
        let chunks = splitter(1000, 200).split(&doc(&text));
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn test_full_text_coverage() {
        let text: String = (0..2100).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = splitter(1000, 200).split(&doc(&text));

        // First chunk starts the text, last chunk ends it.
        assert!(text.starts_with(&chunks[0].content));
        assert!(text.ends_with(&chunks[chunks.len() - 1].content));
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "Viena é a capital da Áustria. ".repeat(100);
        let chunks = splitter(100, 20).split(&doc(&text));
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 100);
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Vienna hosts concerts every November. ".repeat(50);
        let a = splitter(300, 60).split(&doc(&text));
        let b = splitter(300, 60).split(&doc(&text));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.content, y.content);
            assert_eq!(x.hash, y.hash);
        }
    }
}
