//! Effects produced by state transitions

use super::state::GuessOutcome;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the answerer about the target object
    RequestAnswer {
        question: String,
        target_object: String,
    },

    /// Ask the hinter for a hint not among `previous_hints`
    RequestHint {
        target_object: String,
        previous_hints: Vec<String>,
    },

    /// The last question of the budget has been answered
    QuestionBudgetExhausted { question_limit: u32 },

    /// The round ended with a win or loss
    RoundOver { outcome: GuessOutcome },
}

impl Effect {
    pub fn request_answer(question: impl Into<String>, target_object: impl Into<String>) -> Self {
        Effect::RequestAnswer {
            question: question.into(),
            target_object: target_object.into(),
        }
    }

    pub fn request_hint(target_object: impl Into<String>, previous_hints: &[String]) -> Self {
        Effect::RequestHint {
            target_object: target_object.into(),
            previous_hints: previous_hints.to_vec(),
        }
    }
}
