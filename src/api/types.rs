//! API request and response types

use crate::game::{GameConfig, GamePhase, GuessOutcome, QaEntry};
use crate::runtime::SessionSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of the ask and guess actions
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// What the page sees of a session
///
/// The target object is only present once the round is over.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub round: u32,
    pub phase: GamePhase,
    pub questions_log: Vec<QaEntry>,
    pub hints_log: Vec<String>,
    pub question_count: u32,
    pub question_limit: u32,
    pub questions_remaining: u32,
    pub hints_remaining: u32,
    pub hint_budget: u32,
    pub game_over: bool,
    pub can_ask: bool,
    pub can_hint: bool,
    pub can_guess: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_object: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl SessionResponse {
    pub fn new(snapshot: SessionSnapshot, config: &GameConfig) -> Self {
        let SessionSnapshot { id, session } = snapshot;
        let game_over = session.game_over();
        Self {
            round: session.round(),
            phase: session.phase().clone(),
            questions_log: session.questions_log().to_vec(),
            hints_log: session.hints_log().to_vec(),
            question_count: session.question_count(),
            question_limit: config.question_limit,
            questions_remaining: session.questions_remaining(config),
            hints_remaining: session.hints_remaining(),
            hint_budget: config.hint_budget,
            game_over,
            can_ask: session.can_ask(config),
            can_hint: session.can_hint(),
            can_guess: session.can_guess(),
            target_object: game_over.then(|| session.target_object().to_string()),
            started_at: session.started_at(),
            id,
        }
    }
}

/// Response for a guess
#[derive(Debug, Serialize)]
pub struct GuessResponse {
    pub outcome: GuessOutcome,
    pub session: SessionResponse,
}

/// Game rules and the model behind the collaborators
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub variant: String,
    pub question_limit: u32,
    pub hint_budget: u32,
    /// `None` when no completion service is configured
    pub model: Option<String>,
    pub models: Vec<ModelInfo>,
    pub active_sessions: usize,
}

/// A model the server could use
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub provider: String,
    pub description: String,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
