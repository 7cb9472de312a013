//! The four-step answer pipeline: research, ingest, retrieve, synthesize.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::llm::{LLMError, Provider, StreamChunk, LLM};
use crate::research::{
    self, build_synthesis_prompt, ResearchError, Researcher, ToolError, SYNTHESIS_SYSTEM_PROMPT,
};
use crate::retrieval::{DocumentChunk, DocumentRetriever, RetrievalError, Retriever};

/// Success status code returned by the handler.
pub const STATUS_OK: u16 = 200;

/// Structured result of one pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The model's answer text.
    pub body: String,
    /// Success status code.
    pub status: u16,
}

/// Runs a travel query through research, retrieval, and synthesis.
///
/// Each step sits behind a trait ([`Researcher`], [`Retriever`], [`LLM`]),
/// so implementations can be swapped without touching the sequencing.
/// A pipeline holds no per-request state; every call is independent.
pub struct Pipeline {
    llm: Box<dyn LLM>,
    researcher: Box<dyn Researcher>,
    retriever: Box<dyn Retriever>,
}

impl Pipeline {
    /// Builds the default pipeline from configuration: a tool-using
    /// research agent, a page retriever, and one model for synthesis.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let synthesis_llm = Provider::from_config(&config.llm).build()?;
        let agent_llm = Provider::from_config(&config.llm).build()?;

        let researcher = research::default_agent(agent_llm, &config.research)?;
        let retriever = DocumentRetriever::new(&config.ingest, &config.embedding)?;

        Ok(Self {
            llm: synthesis_llm,
            researcher: Box::new(researcher),
            retriever: Box::new(retriever),
        })
    }

    /// Builds a pipeline from explicit parts.
    pub fn with_parts(
        llm: Box<dyn LLM>,
        researcher: Box<dyn Researcher>,
        retriever: Box<dyn Retriever>,
    ) -> Self {
        Self {
            llm,
            researcher,
            retriever,
        }
    }

    /// Runs the research step alone.
    pub async fn research(&self, query: &str) -> Result<String, PipelineError> {
        Ok(self.researcher.research(query).await?)
    }

    /// Runs the retrieval step alone.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<DocumentChunk>, PipelineError> {
        Ok(self.retriever.retrieve(query).await?)
    }

    /// Renders the synthesis prompt and asks the model for the answer.
    ///
    /// The model's completion is returned verbatim.
    pub async fn synthesize(
        &self,
        query: &str,
        web_context: &str,
        documents: &[DocumentChunk],
    ) -> Result<String, PipelineError> {
        let prompt = build_synthesis_prompt(query, web_context, &format_documents(documents));
        let answer = self
            .llm
            .complete_with_system(SYNTHESIS_SYSTEM_PROMPT, &prompt)
            .await?;
        Ok(answer)
    }

    /// Streaming variant of [`synthesize`](Self::synthesize); chunks of
    /// the completion are sent through the channel as they arrive.
    pub async fn synthesize_streaming(
        &self,
        query: &str,
        web_context: &str,
        documents: &[DocumentChunk],
        tx: mpsc::UnboundedSender<StreamChunk>,
    ) -> Result<(), PipelineError> {
        let prompt = build_synthesis_prompt(query, web_context, &format_documents(documents));
        self.llm
            .stream_complete(SYNTHESIS_SYSTEM_PROMPT, &prompt, tx)
            .await?;
        Ok(())
    }

    /// Whether the synthesis model supports streaming.
    pub fn supports_streaming(&self) -> bool {
        self.llm.supports_streaming()
    }

    /// Runs the full pipeline for a query.
    pub async fn answer(&self, query: &str) -> Result<String, PipelineError> {
        tracing::debug!(query, "running research step");
        let web_context = self.researcher.research(query).await?;

        tracing::debug!(query, "running retrieval step");
        let documents = self.retriever.retrieve(query).await?;

        tracing::debug!(documents = documents.len(), "running synthesis step");
        self.synthesize(query, &web_context, &documents).await
    }

    /// Entry point for one external invocation.
    ///
    /// Extracts the `question` field from the event object, runs the
    /// pipeline, and returns the structured result. A missing or
    /// non-string `question` is an invalid request, not an ambient
    /// failure.
    pub async fn handle(&self, event: &serde_json::Value) -> Result<QueryResponse, PipelineError> {
        let question = event
            .get("question")
            .and_then(|q| q.as_str())
            .ok_or(PipelineError::MissingQuestion)?;

        let body = self.answer(question).await?;

        Ok(QueryResponse {
            body,
            status: STATUS_OK,
        })
    }
}

/// Renders retrieved chunks into the relevant-documents prompt slot.
/// An empty set renders as an empty slot; synthesis still proceeds.
fn format_documents(documents: &[DocumentChunk]) -> String {
    documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Event is missing a 'question' field")]
    MissingQuestion,

    #[error("Research error: {0}")]
    Research(#[from] ResearchError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("LLM error: {0}")]
    LLM(#[from] LLMError),
}

impl PipelineError {
    /// True when the failure was caused by the request itself rather
    /// than by a pipeline step.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::MissingQuestion)
    }
}
