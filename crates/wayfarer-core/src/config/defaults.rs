//! Default values for Wayfarer configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// LLM Defaults
// ============================================================================

/// Default LLM provider.
pub const DEFAULT_LLM_PROVIDER: &str = "openai";

/// Default max tokens for LLM responses.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

// OpenAI defaults
/// Default OpenAI API URL.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
/// Default OpenAI chat model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

// Anthropic defaults
/// Default Anthropic API URL.
pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
/// Default Anthropic model.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
/// Default Anthropic API version.
pub const DEFAULT_ANTHROPIC_API_VERSION: &str = "2023-06-01";

// Ollama defaults
/// Default Ollama API URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/v1";
/// Default Ollama model.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";

// OpenRouter defaults
/// Default OpenRouter API URL.
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";

// ============================================================================
// Research Defaults
// ============================================================================

/// Maximum reasoning iterations before the research agent gives up.
pub const DEFAULT_MAX_ITERATIONS: usize = 8;

/// Default number of web search results fed back to the agent.
pub const DEFAULT_SEARCH_RESULTS: usize = 5;

/// Default number of encyclopedia pages summarized per lookup.
pub const DEFAULT_LOOKUP_RESULTS: usize = 2;

/// Timeout for tool HTTP requests, in seconds.
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// User agent sent by the web tools and the page loader.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; Wayfarer/0.1)";

// ============================================================================
// Ingestion Defaults
// ============================================================================

/// Page the retriever ingests on every call.
pub const DEFAULT_SOURCE_URL: &str = "https://www.dicasdeviagem.com/austria/";

/// Maximum characters per document chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Characters of overlap between consecutive chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Number of chunks returned per retrieval.
pub const DEFAULT_TOP_K: usize = 4;

// ============================================================================
// Embedding Defaults
// ============================================================================

/// Default embedding provider.
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "openai";

/// Default hosted embedding model.
pub const DEFAULT_OPENAI_EMBEDDING_MODEL: &str = "text-embedding-3-small";
