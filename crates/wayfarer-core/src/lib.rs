pub mod config;
pub mod llm;
pub mod pipeline;
pub mod research;
pub mod retrieval;

pub use config::{Config, ConfigError, EmbeddingConfig, IngestConfig, LLMConfig, ResearchConfig};
pub use llm::{ClaudeClient, LLMError, OpenAIClient, LLM};
pub use pipeline::{Pipeline, PipelineError, QueryResponse};
pub use research::{ResearchAgent, ResearchError, Researcher};
pub use retrieval::{DocumentChunk, DocumentRetriever, RetrievalError, Retriever};
