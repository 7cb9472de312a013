use super::tools::Tool;

/// Reasoning format instructions for the research agent.
///
/// The `{tools}` and `{tool_names}` slots are filled by
/// [`build_research_system_prompt`].
const RESEARCH_SYSTEM_TEMPLATE: &str = r#"You are a travel research assistant. Answer the question as well as you can. You have access to the following tools:

{tools}

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, must be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question

Begin!"#;

/// Role instruction for the synthesis step.
pub const SYNTHESIS_SYSTEM_PROMPT: &str = "You are the manager of a travel agency. Your final answer must be a complete and detailed travel itinerary.";

/// Renders the agent instructions with the tool roster.
pub fn build_research_system_prompt(tools: &[Box<dyn Tool>]) -> String {
    let tool_list = tools
        .iter()
        .map(|t| format!("{}: {}", t.name(), t.description()))
        .collect::<Vec<_>>()
        .join("\n");

    let tool_names = tools
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ");

    RESEARCH_SYSTEM_TEMPLATE
        .replace("{tools}", &tool_list)
        .replace("{tool_names}", &tool_names)
}

/// Builds the user prompt for one agent iteration: the question followed
/// by the scratchpad of previous thoughts and observations.
pub fn build_research_prompt(query: &str, scratchpad: &str) -> String {
    if scratchpad.is_empty() {
        format!("Question: {query}")
    } else {
        format!("Question: {query}\n{scratchpad}")
    }
}

/// Builds the synthesis prompt from the three pipeline inputs.
///
/// The rendered text carries the context gathered by the research agent,
/// the retrieved document chunks, and the original user query.
pub fn build_synthesis_prompt(query: &str, web_context: &str, documents: &str) -> String {
    format!(
        r#"Use the event and price context, the user input, and the relevant documents to put the itinerary together.
Context: {web_context}
Relevant documents: {documents}
User: {query}
Assistant: "#
    )
}
