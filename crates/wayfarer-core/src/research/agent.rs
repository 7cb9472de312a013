use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;

use crate::config::ResearchConfig;
use crate::llm::{LLMError, LLM};

use super::prompts::{build_research_prompt, build_research_system_prompt};
use super::tools::{Tool, ToolError};

/// A capability that produces free-text context for a query.
///
/// The pipeline depends on this trait rather than on a concrete agent,
/// so any compliant implementation can be swapped in without touching
/// the orchestration code.
#[async_trait]
pub trait Researcher: Send + Sync {
    /// Gather context for the query and return it as free text.
    async fn research(&self, query: &str) -> Result<String, ResearchError>;
}

/// Tool-using research agent.
///
/// Runs the classic ReAct text protocol: the model is prompted to emit
/// `Thought` / `Action` / `Action Input` lines, the matching tool is
/// executed, its output is appended as an `Observation`, and the loop
/// repeats until the model emits a `Final Answer` or the iteration
/// limit is reached.
pub struct ResearchAgent<L: LLM> {
    llm: L,
    tools: Vec<Box<dyn Tool>>,
    max_iterations: usize,
}

impl<L: LLM> ResearchAgent<L> {
    /// Creates a new agent over the given model and tools.
    pub fn new(llm: L, tools: Vec<Box<dyn Tool>>, config: &ResearchConfig) -> Self {
        Self {
            llm,
            tools,
            max_iterations: config.max_iterations,
        }
    }

    /// Runs the reasoning loop for a query.
    pub async fn run(&self, query: &str) -> Result<String, ResearchError> {
        let system_prompt = build_research_system_prompt(&self.tools);
        let mut scratchpad = String::new();

        for iteration in 0..self.max_iterations {
            let prompt = build_research_prompt(query, &scratchpad);

            let response = self
                .llm
                .complete_with_system(&system_prompt, &prompt)
                .await?;

            if let Some(answer) = extract_final_answer(&response) {
                tracing::debug!(iteration, "research agent finished");
                return Ok(answer);
            }

            let (action, input) = parse_action(&response).ok_or_else(|| {
                ResearchError::MalformedResponse(truncate(&response, 200))
            })?;

            tracing::debug!(iteration, action = %action, "research agent tool call");

            let observation = match self.find_tool(&action) {
                Some(tool) => tool.call(&input).await?,
                None => format!(
                    "Unknown tool '{}'. Available tools: {}",
                    action,
                    self.tool_names().join(", ")
                ),
            };

            scratchpad.push_str(strip_stop_sequences(response.trim()));
            scratchpad.push_str(&format!("\nObservation: {}\n", observation));
        }

        Err(ResearchError::MaxIterations(self.max_iterations))
    }

    fn find_tool(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
            .map(|t| t.as_ref())
    }

    fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }
}

#[async_trait]
impl<L: LLM> Researcher for ResearchAgent<L> {
    async fn research(&self, query: &str) -> Result<String, ResearchError> {
        self.run(query).await
    }
}

/// Returns the text after `Final Answer:` when the model has concluded.
fn extract_final_answer(response: &str) -> Option<String> {
    response
        .split("Final Answer:")
        .nth(1)
        .map(|answer| answer.trim().to_string())
        .filter(|answer| !answer.is_empty())
}

/// Parses `Action:` / `Action Input:` lines from a model response.
fn parse_action(response: &str) -> Option<(String, String)> {
    // Action input runs to the end of its line; models sometimes emit a
    // speculative "Observation:" continuation which must not be captured.
    let re = Regex::new(r"Action:\s*(.+)\s*[\r\n]+Action Input:\s*([^\r\n]+)")
        .expect("static regex");

    let captures = re.captures(response)?;
    let action = captures.get(1)?.as_str().trim().to_string();
    let input = captures.get(2)?.as_str().trim().to_string();

    if action.is_empty() || input.is_empty() {
        None
    } else {
        Some((action, input))
    }
}

/// Drops any hallucinated observation the model wrote after its action;
/// the real observation is appended by the loop.
fn strip_stop_sequences(response: &str) -> &str {
    match response.find("\nObservation:") {
        Some(pos) => &response[..pos],
        None => response,
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Errors that can occur during research.
#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("LLM error: {0}")]
    LLM(#[from] LLMError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Agent response had no action and no final answer: {0}")]
    MalformedResponse(String),

    #[error("Max iterations ({0}) reached without a final answer")]
    MaxIterations(usize),
}
