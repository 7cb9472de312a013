use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use wayfarer_core::pipeline::STATUS_OK;
use wayfarer_core::research::ResearchError;
use wayfarer_core::retrieval::RetrievalError;
use wayfarer_core::{
    DocumentChunk, LLMError, Pipeline, PipelineError, Researcher, Retriever, LLM,
};

/// LLM stub that records prompts and counts completion calls.
struct StubLLM {
    response: String,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl StubLLM {
    fn new(response: &str) -> (Self, Arc<AtomicUsize>, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let stub = Self {
            response: response.to_string(),
            calls: Arc::clone(&calls),
            prompts: Arc::clone(&prompts),
        };
        (stub, calls, prompts)
    }
}

#[async_trait]
impl LLM for StubLLM {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.response.clone())
    }

    async fn complete_with_system(
        &self,
        _system: &str,
        prompt: &str,
    ) -> Result<String, LLMError> {
        self.complete(prompt).await
    }
}

struct StubResearcher {
    context: String,
}

#[async_trait]
impl Researcher for StubResearcher {
    async fn research(&self, _query: &str) -> Result<String, ResearchError> {
        Ok(self.context.clone())
    }
}

struct StubRetriever {
    documents: Vec<DocumentChunk>,
}

#[async_trait]
impl Retriever for StubRetriever {
    async fn retrieve(&self, _query: &str) -> Result<Vec<DocumentChunk>, RetrievalError> {
        Ok(self.documents.clone())
    }
}

fn stub_pipeline(
    model_output: &str,
    context: &str,
    documents: Vec<DocumentChunk>,
) -> (Pipeline, Arc<AtomicUsize>, Arc<Mutex<Vec<String>>>) {
    let (llm, calls, prompts) = StubLLM::new(model_output);
    let pipeline = Pipeline::with_parts(
        Box::new(llm),
        Box::new(StubResearcher {
            context: context.to_string(),
        }),
        Box::new(StubRetriever { documents }),
    );
    (pipeline, calls, prompts)
}

#[tokio::test]
async fn test_handler_returns_body_and_success_status() {
    let documents = vec![DocumentChunk::new(
        "https://example.com",
        0,
        "Vienna is the capital...",
    )];
    let (pipeline, calls, prompts) =
        stub_pipeline("Here is your itinerary.", "Vienna context", documents);

    let event = json!({ "question": "What is the capital of Austria?" });
    let response = pipeline.handle(&event).await.unwrap();

    // The model's output comes back verbatim with the success code.
    assert_eq!(response.body, "Here is your itinerary.");
    assert_eq!(response.status, STATUS_OK);

    // Synthesis called the model exactly once.
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // The rendered prompt carries all three substituted values.
    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("What is the capital of Austria?"));
    assert!(prompts[0].contains("Vienna context"));
    assert!(prompts[0].contains("Vienna is the capital..."));
}

#[tokio::test]
async fn test_handler_rejects_missing_question() {
    let (pipeline, calls, _prompts) = stub_pipeline("unused", "unused", Vec::new());

    let event = json!({ "body": "no question here" });
    let err = pipeline.handle(&event).await.unwrap_err();

    assert!(matches!(err, PipelineError::MissingQuestion));
    assert!(err.is_client_error());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_handler_rejects_non_string_question() {
    let (pipeline, _calls, _prompts) = stub_pipeline("unused", "unused", Vec::new());

    let event = json!({ "question": 42 });
    let result = pipeline.handle(&event).await;

    assert!(matches!(result, Err(PipelineError::MissingQuestion)));
}

#[tokio::test]
async fn test_synthesis_proceeds_with_empty_documents() {
    // An unreachable or empty source page yields no documents; the
    // pipeline still answers from the research context alone.
    let (pipeline, calls, prompts) =
        stub_pipeline("Answer without documents.", "Vienna context", Vec::new());

    let event = json!({ "question": "What is the capital of Austria?" });
    let response = pipeline.handle(&event).await.unwrap();

    assert_eq!(response.body, "Answer without documents.");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let prompts = prompts.lock().unwrap();
    assert!(prompts[0].contains("Relevant documents:"));
    assert!(prompts[0].contains("Vienna context"));
}

#[tokio::test]
async fn test_answer_returns_model_output_verbatim() {
    let raw = "  raw output, untouched \n";
    let (pipeline, _calls, _prompts) = stub_pipeline(raw, "ctx", Vec::new());

    let answer = pipeline.answer("any question").await.unwrap();
    assert_eq!(answer, raw);
}
