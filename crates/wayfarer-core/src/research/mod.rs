//! Tool-using research over live web sources.
//!
//! The research step gathers free-text context for a travel query by
//! running a bounded reasoning loop over two tools: a web search and an
//! encyclopedic lookup. The loop follows the ReAct text protocol; the
//! pipeline consumes it through the narrow [`Researcher`] trait.

mod agent;
mod prompts;
mod tools;

pub use agent::{ResearchAgent, ResearchError, Researcher};
pub use prompts::{build_synthesis_prompt, SYNTHESIS_SYSTEM_PROMPT};
pub use tools::{DuckDuckGoSearch, Tool, ToolError, WikipediaLookup};

use crate::config::ResearchConfig;
use crate::llm::LLM;

/// Builds the default research agent: web search + encyclopedia lookup.
pub fn default_agent<L: LLM>(
    llm: L,
    config: &ResearchConfig,
) -> Result<ResearchAgent<L>, ToolError> {
    let tools: Vec<Box<dyn Tool>> = vec![
        Box::new(DuckDuckGoSearch::new(config)?),
        Box::new(WikipediaLookup::new(config)?),
    ];

    Ok(ResearchAgent::new(llm, tools, config))
}
