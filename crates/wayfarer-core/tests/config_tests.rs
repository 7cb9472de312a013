use std::io::Write;

use wayfarer_core::config::{
    Config, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_SOURCE_URL, DEFAULT_TOP_K,
};

#[test]
fn test_default_config_values() {
    let config = Config::default();
    assert_eq!(config.ingest.source_url, DEFAULT_SOURCE_URL);
    assert_eq!(config.ingest.chunk_size, DEFAULT_CHUNK_SIZE);
    assert_eq!(config.ingest.chunk_overlap, DEFAULT_CHUNK_OVERLAP);
    assert_eq!(config.ingest.top_k, DEFAULT_TOP_K);
    assert_eq!(config.llm.provider, "openai");
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[llm]
provider = "ollama"
model = "llama3"

[ingest]
source_url = "https://example.com/austria"
top_k = 2

[research]
max_iterations = 3
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.llm.provider, "ollama");
    assert_eq!(config.ingest.source_url, "https://example.com/austria");
    assert_eq!(config.ingest.top_k, 2);
    assert_eq!(config.research.max_iterations, 3);
    // Unset sections keep their defaults
    assert_eq!(config.ingest.chunk_size, DEFAULT_CHUNK_SIZE);
}

#[test]
fn test_config_rejects_overlap_not_smaller_than_chunk_size() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[ingest]
chunk_size = 100
chunk_overlap = 150
"#
    )
    .unwrap();

    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_default_config_string_roundtrips() {
    let rendered = Config::default_config_string();
    let parsed: Config = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed.ingest.source_url, DEFAULT_SOURCE_URL);
}
