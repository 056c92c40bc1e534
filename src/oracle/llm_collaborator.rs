//! Collaborator backed by a language model

use super::prompts::{hinter_request, namer_request, PromptSet};
use super::{Collaborator, CollaboratorError};
use crate::game::Answer;
use crate::llm::{LlmRequest, LlmService};
use async_trait::async_trait;
use std::sync::Arc;

/// Terms the namer must never produce: brands and non-answers
const DISALLOWED_TERMS: &[&str] = &[
    "object", "thing", "item", "something", "nothing", "iphone", "ipad", "android", "lego",
    "xbox", "playstation", "nintendo", "coca-cola", "coke", "pepsi", "kleenex", "velcro",
    "frisbee", "google", "amazon", "tesla", "barbie",
];

const MAX_OBJECT_WORDS: usize = 3;
const MAX_HINT_CHARS: usize = 200;

/// Collaborator that asks an LLM for objects, answers and hints
pub struct LlmCollaborator {
    llm: Arc<dyn LlmService>,
    prompts: PromptSet,
}

impl LlmCollaborator {
    pub fn new(llm: Arc<dyn LlmService>, prompts: PromptSet) -> Self {
        Self { llm, prompts }
    }
}

#[async_trait]
impl Collaborator for LlmCollaborator {
    async fn name_object(
        &self,
        category: Option<&str>,
        avoid: &[String],
    ) -> Result<String, CollaboratorError> {
        let request = LlmRequest::new(self.prompts.namer.clone(), namer_request(category, avoid))
            .with_max_tokens(10)
            .with_temperature(1.0);
        let response = self.llm.complete(&request).await?;

        let object = clean_object_name(&response.text).ok_or_else(|| {
            CollaboratorError::Rejected(format!("unusable object {:?}", response.text))
        })?;
        if avoid.iter().any(|a| a.eq_ignore_ascii_case(&object)) {
            return Err(CollaboratorError::Rejected(format!("repeated object {object:?}")));
        }
        Ok(object)
    }

    async fn answer(&self, question: &str, object: &str) -> Result<Answer, CollaboratorError> {
        let request = LlmRequest::new(self.prompts.answerer_for(object), question)
            .with_max_tokens(50)
            .with_temperature(0.0);
        let response = self.llm.complete(&request).await?;

        parse_answer(&response.text)
            .ok_or_else(|| CollaboratorError::Malformed(response.text.trim().to_string()))
    }

    async fn hint(
        &self,
        object: &str,
        previous_hints: &[String],
    ) -> Result<String, CollaboratorError> {
        let request = LlmRequest::new(
            self.prompts.hinter_for(object),
            hinter_request(previous_hints),
        )
        .with_max_tokens(80)
        .with_temperature(0.8);
        let response = self.llm.complete(&request).await?;

        clean_hint(&response.text, object, previous_hints)
    }
}

/// Read Yes/No/Maybe from the first word of a reply
pub(crate) fn parse_answer(raw: &str) -> Option<Answer> {
    let first = raw
        .split_whitespace()
        .next()?
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect::<String>()
        .to_ascii_lowercase();

    match first.as_str() {
        "yes" => Some(Answer::Yes),
        "no" => Some(Answer::No),
        "maybe" => Some(Answer::Maybe),
        _ => None,
    }
}

/// Normalize a namer reply into a plain lowercase noun, or reject it
pub(crate) fn clean_object_name(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let trimmed = line
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    let mut words: Vec<&str> = trimmed.split_whitespace().collect();
    if matches!(words.first(), Some(&("a" | "an" | "the"))) {
        words.remove(0);
    }
    if words.is_empty() || words.len() > MAX_OBJECT_WORDS {
        return None;
    }

    let object = words.join(" ");
    let well_formed = object
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-');
    let disallowed = DISALLOWED_TERMS
        .iter()
        .any(|term| words.iter().any(|w| w == term) || object == *term);

    (well_formed && !disallowed).then_some(object)
}

/// Validate a hinter reply against the object and earlier hints
pub(crate) fn clean_hint(
    raw: &str,
    object: &str,
    previous_hints: &[String],
) -> Result<String, CollaboratorError> {
    let hint: String = raw
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
        .trim()
        .chars()
        .take(MAX_HINT_CHARS)
        .collect();

    if hint.is_empty() {
        return Err(CollaboratorError::Malformed("empty hint".to_string()));
    }
    if hint.to_lowercase().contains(&object.to_lowercase()) {
        return Err(CollaboratorError::Rejected("hint names the object".to_string()));
    }
    if previous_hints.iter().any(|h| h.eq_ignore_ascii_case(&hint)) {
        return Err(CollaboratorError::Rejected("hint repeats an earlier one".to_string()));
    }
    Ok(hint)
}
