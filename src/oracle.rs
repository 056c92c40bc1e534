//! Collaborators the game consults: the namer, the answerer and the hinter
//!
//! Every capability sits behind one [`Collaborator`] trait. The [`Oracle`]
//! wraps a collaborator with a timeout and substitutes an in-domain fallback
//! for every failure, so callers always get a usable value.

mod llm_collaborator;
mod prompts;

pub use llm_collaborator::LlmCollaborator;
pub use prompts::PromptSet;

use crate::game::Answer;
use crate::llm::LlmError;
use async_trait::async_trait;
use rand::seq::{IteratorRandom, SliceRandom};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Objects used when the namer fails
pub const FALLBACK_OBJECTS: &[&str] = &[
    "cat", "dog", "book", "phone", "chair", "table", "car", "tree", "house", "bicycle",
    "computer", "pencil", "shoe", "cup", "clock",
];

/// Hints used when the hinter fails, in order of preference
pub const FALLBACK_HINTS: &[&str] = &[
    "Think about where you would usually find it.",
    "Consider what it is mostly made of.",
    "Picture how big it is compared to your hand.",
];

/// Why a collaborator could not produce a value
#[derive(Debug, Clone, Error)]
pub enum CollaboratorError {
    #[error("completion service unavailable: {0}")]
    Unavailable(#[from] LlmError),
    #[error("no completion service configured")]
    Offline,
    #[error("malformed reply: {0}")]
    Malformed(String),
    #[error("reply rejected: {0}")]
    Rejected(String),
}

/// The external capabilities the game relies on
#[async_trait]
pub trait Collaborator: Send + Sync {
    /// Choose a concrete, common, family-friendly object, not one of `avoid`
    async fn name_object(
        &self,
        category: Option<&str>,
        avoid: &[String],
    ) -> Result<String, CollaboratorError>;

    /// Answer a yes/no question about `object`
    async fn answer(&self, question: &str, object: &str) -> Result<Answer, CollaboratorError>;

    /// A new hint for `object` that repeats none of `previous_hints`
    async fn hint(
        &self,
        object: &str,
        previous_hints: &[String],
    ) -> Result<String, CollaboratorError>;
}

/// Collaborator used when no model is configured; every call falls back
pub struct OfflineCollaborator;

#[async_trait]
impl Collaborator for OfflineCollaborator {
    async fn name_object(
        &self,
        _category: Option<&str>,
        _avoid: &[String],
    ) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Offline)
    }

    async fn answer(&self, _question: &str, _object: &str) -> Result<Answer, CollaboratorError> {
        Err(CollaboratorError::Offline)
    }

    async fn hint(
        &self,
        _object: &str,
        _previous_hints: &[String],
    ) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Offline)
    }
}

/// Infallible front for a collaborator
#[derive(Clone)]
pub struct Oracle {
    collaborator: Arc<dyn Collaborator>,
    timeout: Duration,
    category: Option<String>,
}

impl Oracle {
    pub fn new(collaborator: Arc<dyn Collaborator>, timeout: Duration) -> Self {
        Self {
            collaborator,
            timeout,
            category: None,
        }
    }

    /// Steer the namer toward a category of objects
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// A target object for a new round; never empty
    pub async fn name_object(&self, avoid: &[String]) -> String {
        let call = self
            .collaborator
            .name_object(self.category.as_deref(), avoid);
        match self.bounded("namer", call).await {
            Some(object) => object,
            None => fallback_object(avoid),
        }
    }

    /// An answer to `question`; failures become `Error` or `Maybe`
    pub async fn answer(&self, question: &str, object: &str) -> Answer {
        match timeout(self.timeout, self.collaborator.answer(question, object)).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(CollaboratorError::Malformed(reply))) => {
                tracing::warn!(reply = %reply, "Answerer reply was not Yes/No/Maybe");
                Answer::Maybe
            }
            Ok(Err(e)) => {
                log_failure("answerer", &e);
                match e {
                    CollaboratorError::Rejected(_) => Answer::Maybe,
                    _ => Answer::Error,
                }
            }
            Err(_) => {
                tracing::warn!(
                    collaborator = "answerer",
                    timeout_secs = self.timeout.as_secs(),
                    "Collaborator timed out"
                );
                Answer::Error
            }
        }
    }

    /// A hint not among `previous_hints` when the hinter can supply one
    pub async fn hint(&self, object: &str, previous_hints: &[String]) -> String {
        let call = self.collaborator.hint(object, previous_hints);
        match self.bounded("hinter", call).await {
            Some(hint) => hint,
            None => fallback_hint(previous_hints),
        }
    }

    async fn bounded<T>(
        &self,
        collaborator: &'static str,
        call: impl Future<Output = Result<T, CollaboratorError>>,
    ) -> Option<T> {
        match timeout(self.timeout, call).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                log_failure(collaborator, &e);
                None
            }
            Err(_) => {
                tracing::warn!(
                    collaborator,
                    timeout_secs = self.timeout.as_secs(),
                    "Collaborator timed out"
                );
                None
            }
        }
    }
}

fn log_failure(collaborator: &'static str, error: &CollaboratorError) {
    if matches!(error, CollaboratorError::Offline) {
        tracing::debug!(collaborator, "Offline, using fallback");
    } else {
        tracing::warn!(collaborator, error = %error, "Collaborator failed, using fallback");
    }
}

/// Random fallback object, preferring one not in `avoid`
pub fn fallback_object(avoid: &[String]) -> String {
    let mut rng = rand::thread_rng();
    FALLBACK_OBJECTS
        .iter()
        .filter(|o| !avoid.iter().any(|a| a.eq_ignore_ascii_case(o)))
        .choose(&mut rng)
        .or_else(|| FALLBACK_OBJECTS.choose(&mut rng))
        .map_or_else(|| "book".to_string(), |o| (*o).to_string())
}

/// First generic hint not yet issued; numbered once the list runs out
pub fn fallback_hint(previous_hints: &[String]) -> String {
    let issued = |hint: &str| previous_hints.iter().any(|p| p == hint);
    if let Some(hint) = FALLBACK_HINTS.iter().find(|h| !issued(**h)) {
        return (*hint).to_string();
    }
    (previous_hints.len() + 1..)
        .map(|n| format!("Keep narrowing it down (hint {n})."))
        .find(|hint| !issued(hint.as_str()))
        .unwrap_or_default()
}
