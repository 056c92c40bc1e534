//! Events that can occur in a game session

use super::state::Answer;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    AskQuestion { text: String },
    RequestHint,
    SubmitGuess { text: String },

    // Collaborator events
    AnswerReceived { answer: Answer },
    HintReceived { hint: String },
    NewRound { target_object: String },
}

impl Event {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Event::AskQuestion { .. } => "ask_question",
            Event::RequestHint => "request_hint",
            Event::SubmitGuess { .. } => "submit_guess",
            Event::AnswerReceived { .. } => "answer_received",
            Event::HintReceived { .. } => "hint_received",
            Event::NewRound { .. } => "new_round",
        }
    }
}
