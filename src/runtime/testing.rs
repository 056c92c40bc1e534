//! Mock implementations for testing
//!
//! These mocks stand in for the completion service and the collaborators so
//! the runtime and oracle can be exercised without network I/O.

use crate::game::Answer;
use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use crate::oracle::{Collaborator, CollaboratorError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock LLM Service
// ============================================================================

/// Mock completion service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    model_id: String,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Mock Collaborator
// ============================================================================

/// Scripted collaborator
///
/// Objects and hints are served from queues; once a queue runs dry the mock
/// falls back to `"book"` and numbered hints.
pub struct MockCollaborator {
    objects: Mutex<VecDeque<String>>,
    answer: Result<Answer, CollaboratorError>,
    hints: Mutex<VecDeque<String>>,
    fail_all: bool,
    delay: Option<Duration>,
    answer_delay: Option<Duration>,
    name_calls: Mutex<Vec<Vec<String>>>,
    hint_count: Mutex<usize>,
}

impl MockCollaborator {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(VecDeque::new()),
            answer: Ok(Answer::Yes),
            hints: Mutex::new(VecDeque::new()),
            fail_all: false,
            delay: None,
            answer_delay: None,
            name_calls: Mutex::new(Vec::new()),
            hint_count: Mutex::new(0),
        }
    }

    /// Every call fails as if the service were unreachable
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::new()
        }
    }

    pub fn with_object(self, object: &str) -> Self {
        self.objects.lock().unwrap().push_back(object.to_string());
        self
    }

    pub fn with_objects(self, objects: &[&str]) -> Self {
        objects.iter().fold(self, |mock, o| mock.with_object(o))
    }

    pub fn with_answer(mut self, answer: Answer) -> Self {
        self.answer = Ok(answer);
        self
    }

    pub fn with_answer_error(mut self, error: CollaboratorError) -> Self {
        self.answer = Err(error);
        self
    }

    pub fn with_hint(self, hint: &str) -> Self {
        self.hints.lock().unwrap().push_back(hint.to_string());
        self
    }

    pub fn with_hints(self, hints: &[&str]) -> Self {
        hints.iter().fold(self, |mock, h| mock.with_hint(h))
    }

    /// Delay every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Delay only the answerer
    pub fn with_answer_delay(mut self, delay: Duration) -> Self {
        self.answer_delay = Some(delay);
        self
    }

    /// The `avoid` list of every naming call
    pub fn recorded_name_calls(&self) -> Vec<Vec<String>> {
        self.name_calls.lock().unwrap().clone()
    }

    async fn pause(&self, extra: Option<Duration>) {
        if let Some(delay) = self.delay.or(extra) {
            tokio::time::sleep(delay).await;
        }
    }

    fn unavailable() -> CollaboratorError {
        CollaboratorError::Unavailable(LlmError::network("mock collaborator is down"))
    }
}

impl Default for MockCollaborator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Collaborator for MockCollaborator {
    async fn name_object(
        &self,
        _category: Option<&str>,
        avoid: &[String],
    ) -> Result<String, CollaboratorError> {
        self.name_calls.lock().unwrap().push(avoid.to_vec());
        self.pause(None).await;
        if self.fail_all {
            return Err(Self::unavailable());
        }
        let next = self.objects.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| "book".to_string()))
    }

    async fn answer(&self, _question: &str, _object: &str) -> Result<Answer, CollaboratorError> {
        self.pause(self.answer_delay).await;
        if self.fail_all {
            return Err(Self::unavailable());
        }
        self.answer.clone()
    }

    async fn hint(
        &self,
        _object: &str,
        _previous_hints: &[String],
    ) -> Result<String, CollaboratorError> {
        self.pause(None).await;
        if self.fail_all {
            return Err(Self::unavailable());
        }
        let next = self.hints.lock().unwrap().pop_front();
        let mut count = self.hint_count.lock().unwrap();
        *count += 1;
        Ok(next.unwrap_or_else(|| format!("Hint number {count}")))
    }
}
